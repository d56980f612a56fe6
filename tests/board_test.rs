//! Tests for MissionBoard and the console session

use std::io::Cursor;

use rstest::{fixture, rstest};

use mission_tree::cli::Session;
use mission_tree::{BoardConfig, MissionBoard, MissionError};

#[fixture]
fn board() -> MissionBoard {
    MissionBoard::new(BoardConfig::default())
}

#[fixture]
fn sample_board() -> MissionBoard {
    let mut board = MissionBoard::new(BoardConfig::default());
    board.load_samples();
    board
}

fn run_session(board: &mut MissionBoard, input: &str) -> String {
    let mut output = Vec::new();
    Session::new(Cursor::new(input), &mut output)
        .with_prompt(false)
        .run(board)
        .expect("session should not fail on in-memory io");
    String::from_utf8(output).expect("output should be utf-8")
}

#[rstest]
#[case(0)]
#[case(101)]
#[case(-5)]
fn given_level_out_of_range_when_adding_then_rejects(mut board: MissionBoard, #[case] level: i32) {
    // Act
    let result = board.add(level, "Out of bounds");

    // Assert
    assert_eq!(
        result,
        Err(MissionError::LevelOutOfRange {
            level,
            min: 1,
            max: 100
        })
    );
    assert!(board.is_empty());
}

#[rstest]
#[case("")]
#[case("   ")]
fn given_blank_description_when_adding_then_rejects(
    mut board: MissionBoard,
    #[case] description: &str,
) {
    assert_eq!(
        board.add(10, description),
        Err(MissionError::EmptyDescription)
    );
    assert!(board.is_empty());
}

#[rstest]
fn given_mission_when_found_then_includes_level(mut board: MissionBoard) {
    // Arrange
    assert_eq!(board.add(42, "Slay the basilisk"), Ok(true));

    // Act & Assert
    assert_eq!(
        board.find(42),
        Ok(Some(String::from("[Level 42] Slay the basilisk")))
    );
    assert_eq!(board.find(43), Ok(None));
    assert!(board.find(0).is_err());
}

#[rstest]
fn given_existing_level_when_adding_then_overwrites(mut board: MissionBoard) {
    assert_eq!(board.add(42, "Slay the basilisk"), Ok(true));
    assert_eq!(board.add(42, "Tame the basilisk"), Ok(false));
    assert_eq!(board.len(), 1);
    assert_eq!(
        board.find(42),
        Ok(Some(String::from("[Level 42] Tame the basilisk")))
    );
}

#[rstest]
fn given_samples_when_listing_then_sorted(sample_board: MissionBoard) {
    let levels: Vec<i32> = sample_board
        .tree()
        .iter()
        .map(|mission| mission.level)
        .collect();
    assert_eq!(levels, vec![15, 25, 35, 45, 50, 60, 70, 80, 90, 100]);
    assert_eq!(sample_board.list().len(), 10);
}

#[rstest]
fn given_samples_when_removing_inner_node_then_size_drops_by_one(mut sample_board: MissionBoard) {
    assert_eq!(sample_board.remove(70), Ok(true));
    assert_eq!(sample_board.len(), 9);
    assert_eq!(sample_board.remove(70), Ok(false));
    assert_eq!(sample_board.len(), 9);
}

#[rstest]
fn given_narrow_range_when_validating_then_uses_config() {
    let config = BoardConfig::new(10, 20).unwrap();
    let mut board = MissionBoard::new(config);
    assert!(board.add(15, "In range").is_ok());
    assert_eq!(
        board.remove(21),
        Err(MissionError::LevelOutOfRange {
            level: 21,
            min: 10,
            max: 20
        })
    );
}

#[rstest]
fn given_narrow_range_when_loading_samples_then_skips_outside_levels() {
    // Arrange
    let config = BoardConfig::new(10, 20).unwrap();
    let mut board = MissionBoard::new(config);

    // Act
    let loaded = board.load_samples();

    // Assert
    assert_eq!(loaded, 1);
    assert_eq!(board.len(), 1);
    assert!(board.tree().iter().all(|mission| config.contains(mission.level)));
    assert_eq!(
        board.find(15),
        Ok(Some(String::from("[Level 15] Defeat 5 slimes in the village")))
    );
    assert_eq!(board.stats().highest, Some(15));
}

#[rstest]
fn given_narrow_range_when_running_samples_command_then_reports_loaded_count() {
    let mut board = MissionBoard::new(BoardConfig::new(40, 60).unwrap());

    let output = run_session(&mut board, "samples\nlist\n");

    assert!(output.contains("3 sample missions loaded."));
    assert!(output.contains("Total: 3 missions"));
    assert!(!board.tree().contains(100));
}

#[rstest]
fn given_commands_when_running_session_then_executes_them(mut board: MissionBoard) {
    // Arrange
    let input = "\
add 30 Guard the bridge
add 10 Clear the cellar
add 20 Find the lost ring
find 20
remove 10
remove 10
list
quit
add 99 never reached
";

    // Act
    let output = run_session(&mut board, input);

    // Assert
    assert!(output.contains("Mission added at level 30."));
    assert!(output.contains("Found: [Level 20] Find the lost ring"));
    assert!(output.contains("Mission at level 10 removed."));
    assert!(output.contains("No mission at level 10."));
    assert!(output.contains("[Level 20] Find the lost ring\n[Level 30] Guard the bridge\n"));
    assert!(output.contains("Total: 2 missions"));
    assert_eq!(board.len(), 2);
    assert!(!board.tree().contains(99));
}

#[rstest]
fn given_bad_input_when_running_session_then_reports_and_continues(mut board: MissionBoard) {
    let output = run_session(&mut board, "jump 3\nadd 500 Too hard\nfind x\nadd 5 Fine\n");

    assert!(output.contains("Error: unknown command: jump"));
    assert!(output.contains("Error: level 500 is outside the allowed range 1-100"));
    assert!(output.contains("Error: not a level: x"));
    assert!(output.contains("Mission added at level 5."));
    assert_eq!(board.len(), 1);
}

#[rstest]
#[case("y\n", true)]
#[case("yes\n", true)]
#[case("n\n", false)]
#[case("", false)]
fn given_clear_when_answering_then_respects_confirmation(
    mut sample_board: MissionBoard,
    #[case] answer: &str,
    #[case] cleared: bool,
) {
    let output = run_session(&mut sample_board, &format!("clear\n{answer}"));

    assert_eq!(sample_board.is_empty(), cleared);
    if cleared {
        assert!(output.contains("All missions removed."));
    } else {
        assert!(output.contains("Cancelled."));
        assert_eq!(sample_board.len(), 10);
    }
}

#[rstest]
fn given_samples_when_showing_tree_then_annotates_heights(mut board: MissionBoard) {
    let output = run_session(&mut board, "tree\nsamples\ntree\nstats\n");

    assert!(output.contains("Empty tree"));
    assert!(output.contains("10 sample missions loaded."));
    assert!(output.contains("Lv35 (h=4, bf=-1): Escort the merchant to the city"));
    assert!(output.contains("Total missions: 10"));
    assert!(output.contains("Levels: 15 to 100"));
}
