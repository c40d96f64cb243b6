//! Command handlers and dispatch.

pub mod auth;
pub mod book;
pub mod config_cmd;
pub mod locations;
pub mod rentals;
pub mod session;
pub mod util;
pub mod vehicles;

use rentley_api::ApiClient;
use rentley_core::SessionStore;

use crate::cli::{Command, GlobalOpts};
use crate::error::CliError;

/// Route a parsed command to its handler.
///
/// `Config` and `Completions` never reach this point -- they are
/// handled in `main` before a client is built.
pub async fn dispatch(
    command: Command,
    client: &ApiClient,
    store: &SessionStore,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match command {
        Command::Login(args) => auth::login(client, store, args, global).await,
        Command::Logout => auth::logout(client, global).await,
        Command::Whoami => auth::whoami(client, store, global).await,
        Command::Register(args) => auth::register(client, args, global).await,
        Command::ChangePassword => auth::change_password(client, store, global).await,
        Command::Vehicles(args) => vehicles::handle(client, store, args, global).await,
        Command::Locations(args) => locations::handle(client, args, global).await,
        Command::Quote(args) => book::quote(client, args, global).await,
        Command::Book(args) => book::book(client, store, args, global).await,
        Command::Rentals(args) => rentals::handle(client, store, args, global).await,
        Command::Config(_) | Command::Completions(_) => {
            unreachable!("handled before dispatch")
        }
    }
}
