//! Menu-driven session: search by city or location, toggle units.

use chrono::Local;
use inquire::{InquireError, Select, Text};
use std::fmt;
use weather_core::{LocationQuery, Locator, ProxyClient, Session, UiError, UnitSystem};

use crate::render;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    SearchCity,
    MyLocation,
    ToggleUnits(UnitSystem),
    Quit,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::SearchCity => f.write_str("Get weather for a city"),
            Action::MyLocation => f.write_str("Get my location weather"),
            Action::ToggleUnits(next) => write!(f, "Show {}", next.temperature_label()),
            Action::Quit => f.write_str("Quit"),
        }
    }
}

fn menu(session: &Session) -> Vec<Action> {
    vec![
        Action::SearchCity,
        Action::MyLocation,
        Action::ToggleUnits(session.units().toggled()),
        Action::Quit,
    ]
}

fn is_cancel(err: &InquireError) -> bool {
    matches!(
        err,
        InquireError::OperationCanceled | InquireError::OperationInterrupted
    )
}

/// Run one search. Returns the session to continue with.
async fn search(client: &ProxyClient, session: &Session, query: &LocationQuery) -> Session {
    println!("Loading...");

    match session.fetch(client, query, &Local).await {
        Ok((next, report)) => {
            println!();
            print!("{}", render::render_report(&report, &Local));
            println!();
            next
        }
        Err(err) => {
            eprintln!("{err}");
            session.clone()
        }
    }
}

pub async fn run(
    client: &ProxyClient,
    locator: &dyn Locator,
    mut session: Session,
) -> anyhow::Result<()> {
    println!("Welcome! Get live weather updates for any city.");

    loop {
        let action = match Select::new("What would you like to do?", menu(&session)).prompt() {
            Ok(action) => action,
            Err(err) if is_cancel(&err) => break,
            Err(err) => return Err(err.into()),
        };

        session = match action {
            Action::SearchCity => {
                let input = match Text::new("City name:").prompt() {
                    Ok(input) => input,
                    Err(err) if is_cancel(&err) => continue,
                    Err(err) => return Err(err.into()),
                };

                match Session::search_city(&input) {
                    Ok(query) => search(client, &session, &query).await,
                    Err(err) => {
                        eprintln!("{err}");
                        session
                    }
                }
            }
            Action::MyLocation => match locator.locate().await {
                Ok(coords) => search(client, &session, &LocationQuery::Coords(coords)).await,
                Err(err) => {
                    eprintln!("{}", UiError::from(err));
                    session
                }
            },
            Action::ToggleUnits(_) => {
                let (next, again) = session.with_units_toggled();
                println!("Units: {}", next.units().temperature_label());
                match again {
                    Some(query) => search(client, &next, &query).await,
                    None => next,
                }
            }
            Action::Quit => break,
        };
    }

    Ok(())
}
