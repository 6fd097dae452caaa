//! Interactive [`Shell`] of the terminal client.

use std::str::FromStr;

use secrecy::SecretBox;
use service::{
    command::{
        Command as _, CreateSession, DestroySession, RegisterByInvitation,
    },
    domain::{invitation, session, user, Session},
    query::{self, Query as _},
};
use tokio::io::{self, AsyncBufReadExt as _, BufReader};

use crate::{guard, render, AsError as _, Route, Service};

/// Usage summary printed by the `help` command and on unknown input.
const HELP: &str = "\
commands:
  open <path>                              navigate to a route
  login <email> <password>                 sign in with credentials
  token <jwt>                              sign in with a raw token
  register <token> <password> <full name>  accept an invitation
  whoami                                   show the current session
  logout                                   sign out
  help                                     show this summary
  quit                                     leave

routes: /  /login  /register/invite  /assets  /shared-with-me  /users  \
/shared/<asset-id>";

/// Interactive shell over the [`Service`].
#[derive(Debug)]
pub struct Shell {
    /// [`Service`] instance.
    service: Service,
}

impl Shell {
    /// Creates a new [`Shell`] over the provided [`Service`].
    #[must_use]
    pub fn new(service: Service) -> Self {
        Self { service }
    }

    /// Runs the interactive loop until EOF or the `quit` command.
    ///
    /// # Errors
    ///
    /// Errors if reading standard input fails.
    pub async fn run(self) -> Result<(), io::Error> {
        self.whoami();
        println!("type `help` for the command summary");

        let mut lines = BufReader::new(io::stdin()).lines();
        loop {
            prompt();
            let Some(line) = lines.next_line().await? else {
                break;
            };
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            match line.parse::<Input>() {
                Err(usage) => println!("{usage}"),
                Ok(Input::Quit) => break,
                Ok(input) => self.dispatch(input).await,
            }
        }

        Ok(())
    }

    /// Dispatches a single parsed [`Input`].
    async fn dispatch(&self, input: Input) {
        match input {
            Input::Open(route) => self.open(route).await,
            Input::Login { email, password } => {
                self.login(CreateSession::ByCredentials { email, password })
                    .await;
            }
            Input::Token(token) => {
                self.login(CreateSession::ByToken(token)).await;
            }
            Input::Register {
                token,
                full_name,
                password,
            } => {
                match self
                    .service
                    .execute(RegisterByInvitation {
                        token,
                        full_name,
                        password,
                    })
                    .await
                {
                    Ok(()) => println!(
                        "Registration successful. You can now sign in.",
                    ),
                    Err(e) => println!("{}", e.as_error().message),
                }
            }
            Input::WhoAmI => self.whoami(),
            Input::Logout => match self.service.execute(DestroySession).await
            {
                Ok(()) => println!("Signed out."),
                Err(e) => println!("{}", e.as_error().message),
            },
            Input::Help => println!("{HELP}"),
            Input::Quit => {}
        }
    }

    /// Establishes a session with the provided [`CreateSession`] command.
    async fn login(&self, cmd: CreateSession) {
        match self.service.execute(cmd).await {
            Ok(session) => {
                if session.is_authenticated() {
                    println!("Signed in.");
                    self.whoami();
                } else {
                    println!("The provided token is not usable: signed out.");
                }
            }
            Err(e) => println!("{}", e.as_error().message),
        }
    }

    /// Navigates to the provided [`Route`] through its guard chain.
    async fn open(&self, route: Route) {
        let session = self.service.session();
        let target = match guard::resolve(&route, &session) {
            guard::Outcome::Pass => route,
            guard::Outcome::Redirect(to) => {
                println!("-> redirected to {to}");
                to
            }
        };
        self.render(target).await;
    }

    /// Renders the screen behind the provided [`Route`].
    async fn render(&self, route: Route) {
        match route {
            Route::Login => {
                println!("Sign in with: login <email> <password>");
            }
            Route::RegisterInvite(_) => println!(
                "Accept the invitation with: \
                 register <token> <password> <full name>",
            ),
            Route::Home => self.whoami(),
            Route::Assets => {
                match self.service.execute(query::assets::List::by(())).await
                {
                    Ok(assets) if assets.is_empty() => {
                        println!("No assets yet.");
                    }
                    Ok(assets) => {
                        for asset in assets {
                            println!("{}", render::asset_row(&asset));
                        }
                    }
                    Err(e) => println!("{}", e.as_error().message),
                }
            }
            Route::SharedWithMe => {
                match self
                    .service
                    .execute(query::shared_with_me::List::by(()))
                    .await
                {
                    Ok(shares) if shares.is_empty() => {
                        println!("Nothing has been shared with you yet.");
                    }
                    Ok(shares) => {
                        for received in shares {
                            println!("{}", render::share_row(&received));
                        }
                    }
                    Err(e) => println!("{}", e.as_error().message),
                }
            }
            Route::Users => {
                match self.service.execute(query::users::List::by(())).await {
                    Ok(users) => {
                        for user in users {
                            println!("{}", render::user_row(&user));
                        }
                    }
                    Err(e) => println!("{}", e.as_error().message),
                }
            }
            Route::SharedAsset(id) => {
                match self
                    .service
                    .execute(query::shared_asset::ByAssetId(id))
                    .await
                {
                    Ok(asset) => println!("{}", render::shared_asset(&asset)),
                    Err(e) => println!("{}", e.as_error().message),
                }
            }
        }
    }

    /// Prints the current [`Session`] summary.
    fn whoami(&self) {
        match self.service.session() {
            Session::Guest => println!("Not signed in."),
            Session::Authenticated(auth) => {
                let role = auth
                    .role
                    .map_or_else(String::new, |role| format!(" ({role})"));
                println!(
                    "Signed in as user `{}`{role}, session expires at {}.",
                    auth.user_id,
                    auth.expires_at.to_rfc3339(),
                );
            }
        }
    }
}

/// Prints the input prompt without a trailing newline.
fn prompt() {
    use std::io::Write as _;

    print!("> ");
    _ = std::io::stdout().flush();
}

/// Parsed [`Shell`] input line.
#[derive(Debug)]
enum Input {
    /// Navigate to a [`Route`].
    Open(Route),

    /// Sign in with credentials.
    Login {
        /// Email of the user.
        email: user::Email,

        /// Password of the user.
        password: SecretBox<user::Password>,
    },

    /// Sign in with a raw token.
    Token(session::Token),

    /// Accept an invitation.
    Register {
        /// Invitation token.
        token: invitation::Token,

        /// Full name of the registering user.
        full_name: user::FullName,

        /// Chosen password.
        password: SecretBox<user::Password>,
    },

    /// Show the current session.
    WhoAmI,

    /// Sign out.
    Logout,

    /// Show the command summary.
    Help,

    /// Leave the shell.
    Quit,
}

impl FromStr for Input {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split_whitespace();
        let cmd = parts.next().unwrap_or_default();

        let parsed = match cmd {
            "open" => {
                let path =
                    parts.next().ok_or("usage: open <path>".to_owned())?;
                path.parse().map(Self::Open).map_err(|e| e.to_string())?
            }
            "login" => {
                let (Some(email), Some(password)) =
                    (parts.next(), parts.next())
                else {
                    return Err("usage: login <email> <password>".to_owned());
                };
                Self::Login {
                    email: email
                        .parse()
                        .map_err(|_| "invalid email".to_owned())?,
                    password: SecretBox::new(Box::new(
                        password
                            .parse()
                            .map_err(|_| "invalid password".to_owned())?,
                    )),
                }
            }
            "token" => {
                let raw =
                    parts.next().ok_or("usage: token <jwt>".to_owned())?;
                Self::Token(raw.into())
            }
            "register" => {
                let (Some(token), Some(password)) =
                    (parts.next(), parts.next())
                else {
                    return Err(
                        "usage: register <token> <password> <full name>"
                            .to_owned(),
                    );
                };
                // The full name consumes the rest of the line, spaces and
                // all.
                let full_name = parts.collect::<Vec<_>>().join(" ");
                return Ok(Self::Register {
                    token: token.into(),
                    full_name: full_name
                        .parse()
                        .map_err(|_| "invalid full name".to_owned())?,
                    password: SecretBox::new(Box::new(
                        password
                            .parse()
                            .map_err(|_| "invalid password".to_owned())?,
                    )),
                });
            }
            "whoami" => Self::WhoAmI,
            "logout" => Self::Logout,
            "help" => Self::Help,
            "quit" | "exit" => Self::Quit,
            other => {
                return Err(format!("unknown command `{other}`; try `help`"));
            }
        };

        if parts.next().is_some() {
            return Err(format!("trailing input after `{cmd}`; try `help`"));
        }

        Ok(parsed)
    }
}

#[cfg(test)]
mod spec {
    use super::{Input, Route};

    #[test]
    fn parses_navigation() {
        assert!(matches!(
            "open /assets".parse::<Input>().unwrap(),
            Input::Open(Route::Assets),
        ));

        assert!("open".parse::<Input>().is_err());
        assert!("open /nope".parse::<Input>().is_err());
    }

    #[test]
    fn parses_session_commands() {
        assert!(matches!(
            "login someone@example.com hunter2".parse::<Input>().unwrap(),
            Input::Login { .. },
        ));
        assert!(matches!(
            "token abc.def.ghi".parse::<Input>().unwrap(),
            Input::Token(_),
        ));
        assert!(matches!(
            "logout".parse::<Input>().unwrap(),
            Input::Logout,
        ));

        assert!("login someone@example.com".parse::<Input>().is_err());
        assert!("login not-an-email hunter2".parse::<Input>().is_err());
    }

    #[test]
    fn parses_registration_with_spaced_name() {
        let input = "register tkn hunter2 Ada Lovelace"
            .parse::<Input>()
            .unwrap();

        let Input::Register {
            token, full_name, ..
        } = input
        else {
            panic!("expected `Input::Register`");
        };
        assert_eq!(AsRef::<str>::as_ref(&token), "tkn");
        assert_eq!(AsRef::<str>::as_ref(&full_name), "Ada Lovelace");
    }

    #[test]
    fn rejects_unknown_and_trailing_input() {
        assert!("frobnicate".parse::<Input>().is_err());
        assert!("logout now".parse::<Input>().is_err());
    }
}
