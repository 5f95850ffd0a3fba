//! Text rendering of the board
//!
//! Pure functions from board state to the lines the console prints.

use std::fmt::Write as _;

use crate::board::{Board, Card, Category, Modal, CATEGORY_ROSTER, CHECKING_MESSAGE};

const TITLE: &str = "Party Dish Organizer";
const CONNECTED_MESSAGE: &str = "Connected to backend";

/// Length of the id handle shown for persisted cards
pub const SHORT_ID_LEN: usize = 8;

/// Handle shown for a card; placeholders keep their full id
pub fn short_id(card: &Card) -> &str {
    if card.is_placeholder() {
        return &card.id;
    }
    match card.id.char_indices().nth(SHORT_ID_LEN) {
        Some((end, _)) => &card.id[..end],
        None => &card.id,
    }
}

/// One-line connection status, if there is anything to say
pub fn status_banner(board: &Board) -> Option<String> {
    if board.loading() {
        return Some(format!("... {}", CHECKING_MESSAGE));
    }
    if let Some(error) = board.error() {
        return Some(format!("!! {}", error));
    }
    board
        .backend_ready()
        .then(|| format!("ok {}", CONNECTED_MESSAGE))
}

/// Screen shown while the backend cannot be used
pub fn not_deployed() -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Backend Not Deployed Yet");
    let _ = writeln!(out);
    let _ = writeln!(out, "The board is ready, but the backend is not answering.");
    let _ = writeln!(out, "Start it with `party-board-api`, or point `client.api_url`");
    let _ = writeln!(out, "(or PARTY_BOARD_API_URL) at a deployed one.");
    let _ = writeln!(out);
    let _ = write!(out, "Type `retry` to check again.");
    out
}

/// Lines for one card
pub fn card_lines(card: &Card) -> Vec<String> {
    let mut lines = vec![format!(
        "[{}] {}: {}",
        short_id(card),
        card.couple_name,
        card.dish_name
    )];
    if let Some(warning) = card.dietary_warning() {
        lines.push(format!("    ! {}", warning));
    }
    if card.is_placeholder() {
        lines.push("    (drag to assign)".to_string());
    }
    lines
}

/// The pre-made couples waiting to be assigned
pub fn roster(placeholders: &[Card]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Pre-Made Couples");
    let _ = writeln!(
        out,
        "Drag these to a category, or open one to choose its dish first"
    );
    for card in placeholders {
        for line in card_lines(card) {
            let _ = writeln!(out, "  {}", line);
        }
    }
    out
}

/// Header line for a category
pub fn category_header(category: &Category) -> String {
    let mut header = format!(
        "== {} ({}) {}",
        category.name,
        category.id,
        category.count_label()
    );
    if category.is_full() {
        header.push_str(" FULL");
    }
    header
}

/// All categories with their cards
pub fn category_grid(categories: &[Category]) -> String {
    let mut out = String::new();
    for category in categories {
        let _ = writeln!(out, "{}", category_header(category));
        if category.cards.is_empty() {
            let _ = writeln!(out, "  Drop dishes here");
        }
        for card in &category.cards {
            for line in card_lines(card) {
                let _ = writeln!(out, "  {}", line);
            }
        }
    }
    out
}

/// The open modal form
pub fn modal(modal: &Modal, error: Option<&str>) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "+-- {}", modal.title());

    match modal {
        Modal::Picker(m) => {
            let _ = writeln!(out, "| dish:     {}", m.dish_name);
            let _ = writeln!(out, "| diet:     {}", m.dietary_restrictions);
            let choices: Vec<String> = CATEGORY_ROSTER
                .iter()
                .map(|slot| {
                    let mark = if m.category_id.as_deref() == Some(slot.id) { "*" } else { " " };
                    format!("{}{} ({})", mark, slot.label, slot.id)
                })
                .collect();
            let _ = writeln!(out, "| category: {}", choices.join("  "));
        }
        Modal::Edit(m) => {
            let _ = writeln!(out, "| dish:     {}", m.dish_name);
            let _ = writeln!(out, "| diet:     {}", m.dietary_restrictions);
        }
        Modal::AddDish(m) => {
            let _ = writeln!(out, "| couple:   {}", m.couple_name);
            let _ = writeln!(out, "| dish:     {}", m.dish_name);
            let _ = writeln!(out, "| diet:     {}", m.dietary_restrictions);
            let _ = writeln!(
                out,
                "| category: {}",
                m.category_id.as_deref().unwrap_or("(choose one)")
            );
        }
    }

    if let Some(preview) = modal.dietary_preview() {
        let _ = writeln!(out, "| shows as: ! {}", preview);
    }
    if let Some(error) = error {
        let _ = writeln!(out, "| error:    {}", error);
    }

    let save = if modal.can_submit() { "save" } else { "save (incomplete)" };
    let _ = write!(out, "+-- {} | cancel", save);
    out
}

/// Blocking notification for a failed write
pub fn notice(text: &str) -> String {
    format!("!! {}  (type `dismiss` to close)", text)
}

/// The whole screen
pub fn screen(board: &Board, placeholders: &[Card]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", TITLE);
    if let Some(banner) = status_banner(board) {
        let _ = writeln!(out, "{}", banner);
    }
    let _ = writeln!(out);

    match board {
        Board::Initializing => {}
        Board::Unreachable { .. } => {
            let _ = writeln!(out, "{}", not_deployed());
        }
        Board::Ready(ready) => {
            let _ = writeln!(out, "{}", roster(placeholders));
            let _ = write!(out, "{}", category_grid(&ready.categories));
            if let Some(synced) = ready.last_synced {
                let _ = writeln!(out, "(synced {})", synced.format("%H:%M:%S"));
            }
            if let Some(modal) = &ready.modal {
                let _ = writeln!(out);
                let _ = writeln!(out, "{}", self::modal(modal, ready.modal_error.as_deref()));
            }
            if let Some(text) = &ready.notice {
                let _ = writeln!(out);
                let _ = writeln!(out, "{}", notice(text));
            }
        }
    }
    out
}
