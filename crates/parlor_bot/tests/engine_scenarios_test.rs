//! End-to-end game flows through the store's per-kind engines.

use parlor_bot::GameStore;
use parlor_core::{ConversationId, GameKind, Participant, PlayerId};
use parlor_dice::{DiceError, RollOutcome};
use parlor_tictactoe::{Mark, Placement, Position, Square, TicTacToeError, TicTacToeGame, check_winner};
use parlor_wordchain::WordChainError;

fn room() -> ConversationId {
    ConversationId::from("room-1")
}

fn human(id: &str) -> Participant {
    Participant::human(id)
}

#[test]
fn test_tictactoe_human_game_to_win() {
    let store = GameStore::with_seed(7);
    let ttt = store.tictactoe();

    let created = ttt.create_game(&room(), PlayerId::from("alice"), false);
    assert!(matches!(created, TicTacToeGame::Waiting(_)));
    assert_eq!(ttt.join_game(&room(), PlayerId::from("alice")), Err(TicTacToeError::SamePlayer));
    ttt.join_game(&room(), PlayerId::from("bob")).expect("bob joins");

    for (player, square) in [("alice", "1"), ("bob", "4"), ("alice", "2"), ("bob", "5")] {
        let report = ttt.make_move(&room(), &human(player), square).expect("legal move");
        assert!(!report.placement.is_terminal());
    }

    let report = ttt.make_move(&room(), &human("alice"), "3").expect("winning move");
    assert!(matches!(report.placement, Placement::Won { ref winner, .. } if *winner == human("alice")));
    assert!(ttt.active_game(&room()).is_none());
    assert_eq!(store.busy_kind(&room()), None);
}

#[test]
fn test_tictactoe_rejections_leave_board_untouched() {
    let store = GameStore::with_seed(7);
    let ttt = store.tictactoe();

    assert_eq!(ttt.join_game(&room(), PlayerId::from("bob")), Err(TicTacToeError::NoGame));

    ttt.create_game(&room(), PlayerId::from("alice"), false);
    assert_eq!(
        ttt.make_move(&room(), &human("alice"), "5"),
        Err(TicTacToeError::NotYourTurn),
        "moves are refused until someone joins"
    );
    ttt.join_game(&room(), PlayerId::from("bob")).expect("join");

    let before = ttt.active_game(&room()).expect("active");
    assert_eq!(ttt.make_move(&room(), &human("bob"), "5"), Err(TicTacToeError::NotYourTurn));
    assert_eq!(ttt.make_move(&room(), &human("carol"), "5"), Err(TicTacToeError::NotYourTurn));
    for bad in ["0", "10", "abc", ""] {
        assert_eq!(ttt.make_move(&room(), &human("alice"), bad), Err(TicTacToeError::InvalidMove));
    }
    assert_eq!(ttt.active_game(&room()), Some(before));

    ttt.make_move(&room(), &human("alice"), "5").expect("center");
    assert_eq!(ttt.make_move(&room(), &human("bob"), "5"), Err(TicTacToeError::InvalidMove));
    let game = ttt.active_game(&room()).expect("active");
    assert_eq!(game.current_participant(), &human("bob"));
}

#[test]
fn test_tictactoe_against_ai_center_opening() {
    let store = GameStore::with_seed(42);
    let ttt = store.tictactoe();

    let created = ttt.create_game(&room(), PlayerId::from("u1"), true);
    assert!(matches!(created, TicTacToeGame::Active(_)));

    let report = ttt.make_move(&room(), &human("u1"), "5").expect("center move");
    assert_eq!(report.board.get(Position::Center), Square::Occupied(Mark::X));
    assert_eq!(report.placement, Placement::Continue { next: Participant::Ai });
    assert_eq!(check_winner(&report.board), None);

    let game = ttt.active_game(&room()).expect("still active");
    assert_eq!(game.current_participant(), &Participant::Ai);
    assert_eq!(game.board().empty_positions().len(), 8);
}

#[test]
fn test_tictactoe_against_ai_finishes() {
    let store = GameStore::with_seed(42);
    let ttt = store.tictactoe();
    ttt.create_game(&room(), PlayerId::from("alice"), true);

    assert_eq!(ttt.ai_move(&room()), None, "AI waits for the human's move");

    let mut finished = false;
    for _ in 0..5 {
        let game = ttt.active_game(&room()).expect("still active");
        let square = Position::ALL
            .iter()
            .copied()
            .find(|p| game.board().get(*p) == Square::Empty)
            .expect("free square");

        let report = ttt
            .make_move(&room(), &human("alice"), &square.to_string())
            .expect("human move");
        if report.placement.is_terminal() {
            finished = true;
            break;
        }

        let ai_square = ttt.ai_move(&room()).expect("AI has a move");
        let report = ttt
            .make_move(&room(), &Participant::Ai, &ai_square.to_string())
            .expect("AI move is legal");
        if report.placement.is_terminal() {
            finished = true;
            break;
        }
    }

    assert!(finished);
    assert!(ttt.active_game(&room()).is_none());
}

#[test]
fn test_word_chain_between_humans() {
    let store = GameStore::with_seed(3);
    let wcg = store.word_chain();

    wcg.create_game(&room(), PlayerId::from("alice"));
    assert_eq!(wcg.start_game(&room()), Err(WordChainError::NotEnoughPlayers));
    assert_eq!(wcg.join_game(&room(), human("alice")), Err(WordChainError::AlreadyJoined));
    let roster = wcg.join_game(&room(), human("bob")).expect("bob joins");
    assert_eq!(roster, vec![human("alice"), human("bob")]);

    let game = wcg.start_game(&room()).expect("start");
    assert_eq!(game.current_participant(), &human("alice"));

    assert_eq!(wcg.submit_word(&room(), &human("bob"), "apple"), Err(WordChainError::NotYourTurn));
    let accepted = wcg.submit_word(&room(), &human("alice"), "Tiger").expect("first word");
    assert_eq!(accepted.word, "tiger");
    assert_eq!(accepted.points, 5);
    assert_eq!(accepted.next, human("bob"));

    assert_eq!(wcg.submit_word(&room(), &human("bob"), "apple"), Err(WordChainError::WrongLetter('r')));
    wcg.submit_word(&room(), &human("bob"), "rabbit").expect("chained");
    assert_eq!(wcg.submit_word(&room(), &human("alice"), "tiger"), Err(WordChainError::WordUsed));
    assert_eq!(wcg.submit_word(&room(), &human("alice"), "t"), Err(WordChainError::TooShort));

    let scores = wcg.end_game(&room()).expect("scores");
    assert_eq!(scores.get(&human("alice")), Some(5));
    assert_eq!(scores.get(&human("bob")), Some(6));
    assert_eq!(store.busy_kind(&room()), None);
}

#[test]
fn test_word_chain_ai_follows_the_chain() {
    let store = GameStore::with_seed(11);
    let wcg = store.word_chain();

    wcg.create_game(&room(), PlayerId::from("alice"));
    wcg.join_game(&room(), Participant::Ai).expect("AI joins");
    wcg.start_game(&room()).expect("start");

    assert_eq!(wcg.ai_word(&room()).map(|w| w.starts_with('a')), Some(true));

    wcg.submit_word(&room(), &human("alice"), "house").expect("alice");
    let word = wcg.ai_word(&room()).expect("AI knows an e-word");
    assert!(word.starts_with('e'));

    let accepted = wcg.submit_word(&room(), &Participant::Ai, word).expect("AI word accepted");
    assert_eq!(accepted.next, human("alice"));
    assert_eq!(wcg.scores(&room()).and_then(|s| s.get(&Participant::Ai)), Some(accepted.points));
}

#[test]
fn test_dice_single_round_duel() {
    let store = GameStore::with_seed(5);
    let dice = store.dice();

    dice.create_game(&room(), PlayerId::from("p1"), 1);
    assert_eq!(store.busy_kind(&room()), Some(GameKind::Dice));
    assert_eq!(dice.join_game(&room(), human("p1")), Err(DiceError::SamePlayer));
    dice.join_game(&room(), human("p2")).expect("p2 joins");

    assert_eq!(dice.player_roll(&room(), &human("p2")), Err(DiceError::NotYourTurn));

    let first = dice.player_roll(&room(), &human("p1")).expect("p1 rolls");
    let p1_roll = match first {
        RollOutcome::AwaitingOpponent { roll, next } => {
            assert_eq!(next, human("p2"));
            roll
        }
        other => panic!("expected p2 to be up, got {other:?}"),
    };
    assert_eq!(dice.player_roll(&room(), &human("p1")), Err(DiceError::NotYourTurn));

    let result = match dice.player_roll(&room(), &human("p2")).expect("p2 rolls") {
        RollOutcome::RoundComplete(result) => result,
        other => panic!("expected round result, got {other:?}"),
    };
    assert_eq!(*result.player1_roll(), p1_roll);
    assert!(result.game_finished());

    let expected_winner = match p1_roll.cmp(result.player2_roll()) {
        std::cmp::Ordering::Greater => Some(human("p1")),
        std::cmp::Ordering::Less => Some(human("p2")),
        std::cmp::Ordering::Equal => None,
    };
    assert_eq!(result.round_winner(), &expected_winner);
    assert_eq!(result.game_winner(), expected_winner.as_ref());
    assert!(dice.active_game(&room()).is_none());
}

#[test]
fn test_conversations_are_independent() {
    let store = GameStore::with_seed(1);
    let other = ConversationId::from("room-2");

    store.tictactoe().create_game(&room(), PlayerId::from("alice"), true);
    store.dice().create_game(&other, PlayerId::from("alice"), 3);

    assert_eq!(store.busy_kind(&room()), Some(GameKind::TicTacToe));
    assert_eq!(store.busy_kind(&other), Some(GameKind::Dice));
    assert!(store.tictactoe().end_game(&room()).is_some());
    assert_eq!(store.busy_kind(&other), Some(GameKind::Dice));
}
