use std::io::Write;

use anyhow::Result;
use nsv_lookup::render::{details, list_item, render_view};
use nsv_lookup::{ArticleLookupController, CloseEffect, SubmitStatus};
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

const HELP: &str = "\
Commands:
  submit <url>   look up a URL (scrapes it if the backend has not seen it)
  <url>          same as submit
  list           show the latest articles
  open <n>       show article n from the list
  details        toggle the detail panel of the open article
  close          close the open article
  show           redraw the whole view
  help           show this help
  quit           leave the session";

#[derive(Debug, Clone, PartialEq)]
pub enum SessionCommand {
    Submit(String),
    List,
    Open(usize),
    Details,
    Close,
    Show,
    Help,
    Quit,
}

impl SessionCommand {
    /// Parse one input line. Blank lines yield `Ok(None)`.
    pub fn parse(line: &str) -> std::result::Result<Option<Self>, String> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(None);
        }
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };

        let command = match word.to_lowercase().as_str() {
            "submit" | "s" => SessionCommand::Submit(rest.to_string()),
            "list" | "ls" => SessionCommand::List,
            "open" | "o" => {
                let n: usize = rest
                    .parse()
                    .map_err(|_| format!("Expected an article number, got '{}'", rest))?;
                if n == 0 {
                    return Err("Articles are numbered from 1".to_string());
                }
                SessionCommand::Open(n - 1)
            }
            "details" | "d" => SessionCommand::Details,
            "close" | "c" => SessionCommand::Close,
            "show" => SessionCommand::Show,
            "help" | "?" => SessionCommand::Help,
            "quit" | "exit" | "q" => SessionCommand::Quit,
            _ if rest.is_empty() && looks_like_url(word) => SessionCommand::Submit(word.to_string()),
            other => return Err(format!("Unknown command '{}'. Type 'help' for a list.", other)),
        };
        Ok(Some(command))
    }
}

fn looks_like_url(word: &str) -> bool {
    word.contains('.') || word.contains("://")
}

/// Drive the controller from `input` until it ends or the user quits.
pub async fn run_session<R, W>(controller: &ArticleLookupController, input: R, out: &mut W) -> Result<()>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    writeln!(out, "{}", render_view(&controller.snapshot().await))?;
    writeln!(out, "Type 'help' for commands.")?;
    let mut lines = input.lines();

    while let Some(line) = lines.next_line().await? {
        let command = match SessionCommand::parse(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(message) => {
                writeln!(out, "{}", message)?;
                continue;
            }
        };

        match command {
            SessionCommand::Quit => break,
            SessionCommand::Help => writeln!(out, "{}", HELP)?,
            SessionCommand::Submit(url) => {
                if let SubmitStatus::Discarded = controller.submit_url(&url).await {
                    continue;
                }
                writeln!(out, "{}", render_view(&controller.snapshot().await))?;
            }
            SessionCommand::List => {
                let state = controller.snapshot().await;
                if state.recent_articles.is_empty() {
                    writeln!(out, "No recent articles.")?;
                }
                for (i, article) in state.recent_articles.iter().enumerate() {
                    writeln!(out, "{}", list_item(i, article))?;
                }
            }
            SessionCommand::Open(index) => {
                if controller.open_recent(index).await {
                    writeln!(out, "{}", render_view(&controller.snapshot().await))?;
                } else {
                    writeln!(out, "No article number {}.", index + 1)?;
                }
            }
            SessionCommand::Details => {
                if controller.toggle_detail_panel().await {
                    let state = controller.snapshot().await;
                    if let Some(article) = state.active_modal.article() {
                        write!(out, "{}", details(article))?;
                    }
                } else if controller.snapshot().await.active_modal.is_open() {
                    writeln!(out, "Details hidden.")?;
                } else {
                    writeln!(out, "No article is open.")?;
                }
            }
            SessionCommand::Close => match controller.close_modal().await {
                CloseEffect::NothingOpen => writeln!(out, "No article is open.")?,
                CloseEffect::Dismissed | CloseEffect::Refreshed => {
                    writeln!(out, "{}", render_view(&controller.snapshot().await))?
                }
            },
            SessionCommand::Show => writeln!(out, "{}", render_view(&controller.snapshot().await))?,
        }
        out.flush()?;
    }
    Ok(())
}
