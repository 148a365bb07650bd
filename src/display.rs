//! Console rendering of table snapshots.

use std::fmt::Write;

use pokernow_table::{PlayerInfo, PlayerStatus, TableSnapshot};

/// Chips `player` must add to match the highest bet.
pub(crate) fn to_call(snapshot: &TableSnapshot, player: &PlayerInfo) -> f64 {
    (snapshot.max_bet() - player.bet_amount()).max(0.0)
}

fn join_cards(cards: &[pokernow_table::Card]) -> String {
    cards
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Render the players block printed after every poll.
pub(crate) fn render(snapshot: &TableSnapshot) -> String {
    let mut out = String::new();
    let (folded, active): (Vec<&PlayerInfo>, Vec<&PlayerInfo>) =
        snapshot.players.iter().partition(|p| p.is_folded());

    // Writing to a String cannot fail.
    let _ = writeln!(out, "\nCurrent Players Information:");
    let _ = writeln!(out, "Number of active players: {}", snapshot.players.len());
    if !snapshot.blinds.is_empty() {
        let _ = writeln!(out, "Blinds: {}", snapshot.blinds.join(" / "));
    }
    if let Some(pot) = &snapshot.pot {
        let _ = writeln!(out, "Pot: {}", pot);
    }
    if !snapshot.community_cards.is_empty() {
        let _ = writeln!(out, "Board: {}", join_cards(&snapshot.community_cards));
    }
    if !snapshot.your_cards.is_empty() {
        let _ = writeln!(out, "Your cards: {}", join_cards(&snapshot.your_cards));
    }

    let _ = writeln!(out, "Active Players:");
    for player in active {
        let status = match player.status {
            PlayerStatus::Current => "** Current **".to_string(),
            other => other.to_string(),
        };
        let _ = writeln!(
            out,
            "Name: {} ({}) - Position: {}",
            player.name, status, player.position_name
        );
        let _ = writeln!(out, "  Stack: {}", player.stack);
        let _ = writeln!(out, "  Bet: {}", player.bet_value);
        let due = to_call(snapshot, player);
        if due > 0.0 {
            let _ = writeln!(out, "  To Call: {:.2}", due);
        }
        if let Some(action) = &player.action {
            let _ = writeln!(out, "  Last action: {}", action);
        }
        let _ = writeln!(out, "  ---");
    }

    let _ = writeln!(out, "\nFolded Players:");
    for player in folded {
        let _ = writeln!(out, "Name: {} - Position: {}", player.name, player.position_name);
        let _ = writeln!(out, "  Stack: {}", player.stack);
        let _ = writeln!(out, "  ---");
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pokernow_table::{Card, Rank, Suit};

    fn player(name: &str, bet: &str, status: PlayerStatus, position_name: &str) -> PlayerInfo {
        PlayerInfo {
            name: name.to_string(),
            stack: "1000".to_string(),
            bet_value: bet.to_string(),
            status,
            position: 0,
            position_name: position_name.to_string(),
            position_number: 0,
            seat_index: 0,
            sitting_out: false,
            action: None,
        }
    }

    fn snapshot() -> TableSnapshot {
        TableSnapshot {
            players: vec![
                player("erin", "10", PlayerStatus::Active, "SB"),
                player("alice", "20", PlayerStatus::Active, "BB"),
                player("bob", "0", PlayerStatus::Current, "UTG"),
                player("carol", "0", PlayerStatus::Folded, "BTN"),
            ],
            blinds: vec!["10".to_string(), "20".to_string()],
            pot: Some("30".to_string()),
            current_player_name: "bob".to_string(),
            community_cards: Vec::new(),
            your_cards: vec![Card::new(Rank::Ace, Suit::Spades), Card::Unknown],
            dealer_index: 3,
        }
    }

    #[test]
    fn test_to_call_against_highest_bet() {
        let snap = snapshot();
        assert_eq!(to_call(&snap, &snap.players[0]), 10.0);
        assert_eq!(to_call(&snap, &snap.players[1]), 0.0);
        assert_eq!(to_call(&snap, &snap.players[2]), 20.0);
    }

    #[test]
    fn test_to_call_with_unparsable_bets() {
        let mut snap = snapshot();
        snap.players[1].bet_value = "all in".to_string();
        // Highest parsable bet is now erin's 10.
        assert_eq!(to_call(&snap, &snap.players[2]), 10.0);
        assert_eq!(to_call(&snap, &snap.players[1]), 10.0);
    }

    #[test]
    fn test_render_splits_active_and_folded() {
        let text = render(&snapshot());

        assert!(text.contains("Number of active players: 4"));
        assert!(text.contains("Name: bob (** Current **) - Position: UTG"));
        assert!(text.contains("Name: erin (Active) - Position: SB"));
        assert!(text.contains("  To Call: 10.00"));
        assert!(text.contains("  To Call: 20.00"));
        assert!(text.contains("Your cards: Ace of Spades, Unknown Card"));

        let (active, folded) = text.split_once("Folded Players:").unwrap();
        assert!(!active.contains("carol"));
        assert!(folded.contains("Name: carol - Position: BTN"));
    }

    #[test]
    fn test_render_empty_table() {
        let text = render(&TableSnapshot::default());
        assert!(text.contains("Number of active players: 0"));
        assert!(!text.contains("Pot:"));
        assert!(!text.contains("To Call"));
    }
}
