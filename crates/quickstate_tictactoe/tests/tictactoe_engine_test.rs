//! Tests for the tic-tac-toe engine's public contract.

use quickstate_tictactoe::{
    Board, Game, MoveError, Phase, Player, Position, Square, Status, apply_move, compute_status,
    compute_winner, reset, rules::LINES,
};

/// Builds the board for `code` read as 9 base-3 digits (0 empty, 1 X, 2 O).
fn board_from_code(mut code: u32) -> Board {
    let mut squares = [Square::Empty; 9];
    for square in &mut squares {
        *square = match code % 3 {
            0 => Square::Empty,
            1 => Square::Occupied(Player::X),
            _ => Square::Occupied(Player::O),
        };
        code /= 3;
    }
    Board::from_squares(squares)
}

#[test]
fn test_winner_iff_some_line_is_uniform() {
    for code in 0..3u32.pow(9) {
        let board = board_from_code(code);
        let uniform: Vec<Player> = LINES
            .iter()
            .filter_map(|[a, b, c]| {
                let sq = board.get(*a);
                (sq == board.get(*b) && sq == board.get(*c))
                    .then(|| sq.player())
                    .flatten()
            })
            .collect();

        let winner = compute_winner(&board);
        assert_eq!(winner.is_some(), !uniform.is_empty(), "board {code}");
        if let Some(player) = winner {
            // First line in fixed order decides
            assert_eq!(player, uniform[0], "board {code}");
        }
    }
}

/// Walks every legal game with the pure transition function.
fn explore(board: Board, turn: Player, moves: usize, finished: &mut usize) {
    let winner = compute_winner(&board);
    let status = compute_status(&board, turn, winner);

    if winner.is_some() {
        for cell in 0..9 {
            assert_eq!(apply_move(board, turn, cell), Err(MoveError::GameOver));
        }
        *finished += 1;
        return;
    }

    if moves == 9 {
        assert_eq!(status, Status::Draw);
        *finished += 1;
        return;
    }

    assert_eq!(status, Status::Next(turn));
    let expected_turn = if moves % 2 == 0 { Player::X } else { Player::O };
    assert_eq!(turn, expected_turn);

    for pos in Position::ALL {
        let result = apply_move(board, turn, pos.to_index());
        if board.is_empty(pos) {
            let (next, next_turn) = result.expect("empty square accepts move");
            assert_eq!(next.get(pos), Square::Occupied(turn));
            assert_eq!(next_turn, turn.opponent());
            explore(next, next_turn, moves + 1, finished);
        } else {
            assert_eq!(result, Err(MoveError::SquareOccupied(pos)));
        }
    }
}

#[test]
fn test_every_legal_game() {
    let (board, turn) = reset();
    let mut finished = 0;
    explore(board, turn, 0, &mut finished);
    // Number of distinct complete tic-tac-toe games
    assert_eq!(finished, 255_168);
}

#[test]
fn test_spec_example_completing_row() {
    let board: Board = "XX_ OO_ ___".parse().unwrap();
    let (board, turn) = apply_move(board, Player::X, 2).unwrap();
    let winner = compute_winner(&board);
    assert_eq!(winner, Some(Player::X));
    assert_eq!(compute_status(&board, turn, winner).to_string(), "Winner: X");
}

#[test]
fn test_nine_moves_without_winner_is_draw() {
    // X O X / X O O / O X X
    let mut game = Game::new();
    let moves = [0, 1, 2, 4, 3, 5, 7, 6, 8];
    for (i, cell) in moves.iter().enumerate() {
        let phase = game.play_index(*cell).expect("legal move");
        if i < 8 {
            assert_eq!(phase, Phase::InProgress);
        } else {
            assert_eq!(phase, Phase::Draw);
        }
    }
    assert_eq!(game.status(), Status::Draw);
    assert_eq!(game.winner(), None);
    assert_eq!(game.play_index(0), Err(MoveError::GameOver));
}

#[test]
fn test_history_records_alternating_marks() {
    let game = Game::replay(&[Position::Center, Position::TopLeft, Position::BottomRight]).unwrap();
    let marks: Vec<Player> = game.history().iter().map(|m| m.player).collect();
    assert_eq!(marks, vec![Player::X, Player::O, Player::X]);
}

#[test]
fn test_restart_after_win() {
    let mut game = Game::replay(&[
        Position::TopLeft,
        Position::Center,
        Position::TopCenter,
        Position::BottomLeft,
        Position::TopRight,
    ])
    .unwrap();
    assert_eq!(game.phase(), Phase::Won);
    assert_eq!(game.status().to_string(), "Winner: X");

    game.reset();
    assert_eq!(game.phase(), Phase::InProgress);
    assert_eq!(game.status().to_string(), "Next player: X");
    assert!(game.board().squares().iter().all(|s| *s == Square::Empty));
}
