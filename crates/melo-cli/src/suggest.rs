//! Interactive autocomplete session on stdin.
//!
//! Each input line replaces the search box contents. Lines starting with `:`
//! are keyboard commands: `:down`, `:up`, `:enter`, `:click N`, `:quit`.

use std::sync::Arc;

use melo_client::{Autocomplete, Storefront, SuggestionUpdate};
use melo_core::{AppConfig, FilterState, SuggestionAction, SuggestionList};
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::render;

#[derive(Debug, PartialEq, Eq)]
pub(crate) enum Input {
    Text(String),
    Down,
    Up,
    Enter,
    Click(usize),
    Quit,
}

pub(crate) fn parse_input(line: &str) -> Input {
    match line.trim() {
        ":down" => Input::Down,
        ":up" => Input::Up,
        ":enter" => Input::Enter,
        ":quit" | ":q" => Input::Quit,
        other => match other.strip_prefix(":click ").map(str::trim) {
            Some(index) => index
                .parse()
                .map_or_else(|_| Input::Text(line.to_string()), Input::Click),
            None => Input::Text(line.to_string()),
        },
    }
}

/// Run the interactive autocomplete loop until EOF, `:quit`, or a selection.
///
/// # Errors
///
/// Returns an error if the client cannot be built or stdin fails.
pub(crate) async fn run_suggest(config: &AppConfig) -> anyhow::Result<()> {
    let storefront = Storefront::from_config(config)?;
    let source = Arc::new(storefront.client().clone());
    let (autocomplete, mut updates) = Autocomplete::spawn(source, config.autocomplete_debounce());

    println!("type to search; :down/:up to move, :enter or :click N to choose, :quit to exit");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut typed = String::new();
    let mut list = SuggestionList::default();
    let mut chosen: Option<SuggestionAction> = None;

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                match parse_input(&line) {
                    Input::Text(text) => {
                        typed.clone_from(&text);
                        autocomplete.text_changed(text);
                    }
                    Input::Down => {
                        list.move_down();
                        print!("{}", render::suggestion_list(&list));
                    }
                    Input::Up => {
                        list.move_up();
                        print!("{}", render::suggestion_list(&list));
                    }
                    Input::Enter => {
                        chosen = Some(list.activate(&typed));
                        break;
                    }
                    Input::Click(index) => match list.click(index) {
                        Some(action) => {
                            chosen = Some(action);
                            break;
                        }
                        None => println!("no suggestion #{index}"),
                    },
                    Input::Quit => break,
                }
            }
            Some(update) = updates.recv() => match update {
                SuggestionUpdate::Cleared => list.clear(),
                SuggestionUpdate::Ready(suggestions) => {
                    list = SuggestionList::from_suggestions(&suggestions);
                    print!("{}", render::suggestion_list(&list));
                }
                SuggestionUpdate::Failed(_) => list.clear(),
            },
        }
    }

    autocomplete.shutdown().await;

    let Some(action) = chosen else {
        return Ok(());
    };
    let mut filters = FilterState::new();
    filters.apply_suggestion(&action);
    if let Some(view) = storefront.load_products(&filters).await {
        print!("{}", render::listing(&view, &filters));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_lines_are_text() {
        assert_eq!(parse_input("camis"), Input::Text("camis".to_string()));
    }

    #[test]
    fn keyboard_commands_are_recognized() {
        assert_eq!(parse_input(":down"), Input::Down);
        assert_eq!(parse_input(" :up "), Input::Up);
        assert_eq!(parse_input(":enter"), Input::Enter);
        assert_eq!(parse_input(":click 2"), Input::Click(2));
        assert_eq!(parse_input(":q"), Input::Quit);
    }

    #[test]
    fn malformed_click_is_text() {
        assert_eq!(
            parse_input(":click two"),
            Input::Text(":click two".to_string())
        );
    }
}
