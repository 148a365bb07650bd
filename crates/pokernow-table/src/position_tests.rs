use std::collections::HashSet;

use super::*;

fn seats(count: usize) -> Vec<RawSeat> {
    (0..count)
        .map(|i| RawSeat {
            name: format!("p{}", i),
            stack: "1000".to_string(),
            ..RawSeat::empty(i)
        })
        .collect()
}

fn names(assignment: &Assignment) -> Vec<&str> {
    assignment
        .positions
        .iter()
        .map(|p| p.position_name.as_str())
        .collect()
}

fn assign(seats: &[RawSeat], dealer_raw_index: Option<usize>) -> Assignment {
    let engine = PositionEngine::new();
    let active = engine.active_seats(seats);
    engine.assign_positions(&active, dealer_raw_index)
}

#[test]
fn test_position_table_is_bidirectional() {
    for number in 0..POSITION_TABLE.len() {
        let name = POSITION_TABLE.name(number).unwrap();
        assert_eq!(POSITION_TABLE.number(name), Some(number));
    }
    assert_eq!(POSITION_TABLE.name(BTN), Some("BTN"));
    assert_eq!(POSITION_TABLE.name(8), None);
    assert_eq!(POSITION_TABLE.number("P8"), None);
    assert_eq!(POSITION_TABLE.label(8), "P8");
}

#[test]
fn test_heads_up() {
    let seats = seats(2);
    let result = assign(&seats, Some(1));
    assert_eq!(result.dealer_active_index, 1);
    assert_eq!(names(&result), vec!["SB", "BTN"]);
}

#[test]
fn test_three_handed() {
    let seats = seats(3);
    let result = assign(&seats, Some(0));
    assert_eq!(names(&result), vec!["BTN", "SB", "BB"]);
}

#[test]
fn test_four_handed_dealer_first() {
    let seats = seats(4);
    let result = assign(&seats, Some(0));
    assert_eq!(names(&result), vec!["BTN", "SB", "BB", "UTG"]);
    let numbers: Vec<usize> = result.positions.iter().map(|p| p.position_number).collect();
    assert_eq!(numbers, vec![7, 0, 1, 2]);
}

#[test]
fn test_six_handed() {
    let seats = seats(6);
    let result = assign(&seats, Some(0));
    assert_eq!(names(&result), vec!["BTN", "SB", "BB", "UTG", "UTG+1", "LJ"]);
}

#[test]
fn test_eight_handed_uses_full_table() {
    let seats = seats(8);
    let result = assign(&seats, Some(0));
    assert_eq!(
        names(&result),
        vec!["BTN", "SB", "BB", "UTG", "UTG+1", "LJ", "HJ", "CO"]
    );
}

#[test]
fn test_nine_handed_wraps_around_dealer() {
    let seats = seats(9);
    let result = assign(&seats, Some(3));
    assert_eq!(result.dealer_active_index, 3);
    assert_eq!(
        names(&result),
        vec!["HJ", "CO", "P8", "BTN", "SB", "BB", "UTG", "UTG+1", "LJ"]
    );

    let unique: HashSet<&str> = names(&result).into_iter().collect();
    assert_eq!(unique.len(), 9);
}

#[test]
fn test_every_ring_has_unique_positions_and_one_button() {
    for count in 1..=10 {
        let seats = seats(count);
        for dealer in 0..count {
            let result = assign(&seats, Some(dealer));
            assert_eq!(result.positions.len(), count);

            let numbers: HashSet<usize> =
                result.positions.iter().map(|p| p.position_number).collect();
            assert_eq!(numbers.len(), count, "n={count} dealer={dealer}");

            let buttons = result
                .positions
                .iter()
                .filter(|p| p.position_name == "BTN")
                .count();
            assert_eq!(buttons, 1);
            assert_eq!(result.positions[dealer].position_name, "BTN");

            if count <= POSITION_TABLE.len() {
                assert!(
                    result
                        .positions
                        .iter()
                        .all(|p| POSITION_TABLE.number(&p.position_name).is_some())
                );
            }
        }
    }
}

#[test]
fn test_single_player_is_button() {
    let seats = seats(1);
    let result = assign(&seats, Some(0));
    assert_eq!(names(&result), vec!["BTN"]);
}

#[test]
fn test_missing_dealer_falls_back_to_first_active_seat() {
    let seats = seats(4);
    let result = assign(&seats, None);
    assert_eq!(result.dealer_active_index, 0);
    assert_eq!(names(&result), vec!["BTN", "SB", "BB", "UTG"]);
}

#[test]
fn test_dealer_on_inactive_seat_falls_back() {
    let mut seats = seats(4);
    seats[2].name = String::new();
    let result = assign(&seats, Some(2));
    assert_eq!(result.dealer_active_index, 0);
    assert_eq!(result.positions.len(), 3);
    assert_eq!(names(&result), vec!["BTN", "SB", "BB"]);
}

#[test]
fn test_dealer_raw_index_is_relocated_among_active_seats() {
    let mut seats = seats(6);
    seats[1].stack = "Unknown".to_string();
    seats[3].name = "Player 4".to_string();

    // Active raw indices: 0, 2, 4, 5. Dealer on raw 4 is active index 2.
    let result = assign(&seats, Some(4));
    assert_eq!(result.dealer_active_index, 2);

    let by_raw: Vec<(usize, &str)> = result
        .positions
        .iter()
        .map(|p| (p.dom_index, p.position_name.as_str()))
        .collect();
    assert_eq!(by_raw, vec![(0, "BB"), (2, "UTG"), (4, "BTN"), (5, "SB")]);
}

#[test]
fn test_zero_active_seats() {
    let mut seats = seats(3);
    for seat in &mut seats {
        seat.name.clear();
    }
    let result = assign(&seats, Some(0));
    assert!(result.positions.is_empty());
    assert_eq!(result.dealer_active_index, 0);

    let empty = assign(&[], None);
    assert!(empty.positions.is_empty());
}

#[test]
fn test_assign_reads_dealer_marker() {
    let mut seats = seats(5);
    seats[3].has_dealer_marker = true;
    let result = PositionEngine::new().assign(&seats);
    assert_eq!(result.dealer_active_index, 3);
    assert_eq!(result.positions[4].position_name, "SB");
    assert_eq!(result.positions[0].position_name, "BB");
}

#[test]
fn test_active_order_is_preserved() {
    let mut seats = seats(5);
    seats[0].name.clear();
    let engine = PositionEngine::new();
    let active = engine.active_seats(&seats);
    let indices: Vec<usize> = active.iter().map(|s| s.dom_index).collect();
    assert_eq!(indices, vec![1, 2, 3, 4]);
}

#[test]
fn test_seat_position_display() {
    let seats = seats(3);
    let result = assign(&seats, Some(0));
    assert_eq!(result.positions[1].to_string(), "SB (seat 2)");
}
