use anyhow::{Result, bail};
use chrono::{DateTime, Utc};
use tokio::sync::broadcast::{Receiver, error::TryRecvError};
use tracing::warn;

use socialconnect_core::{CoreError, CredentialVerifier, Hub};
use socialconnect_types::api::{CreatePostRequest, LoginRequest, SignupRequest};
use socialconnect_types::events::Notification;
use socialconnect_types::models::{Post, Session};

pub const HELP: &str = "\
Commands:
  login <identifier> <secret>
  signup <identifier> <secret> <display name...> [| <bio...>]
  logout
  post <body...>
  post-image <image ref> <body...>
  like <post id>
  feed [json]
  whoami
  help
  quit";

#[derive(Debug, Clone)]
pub enum Command {
    Login(LoginRequest),
    Signup(SignupRequest),
    Logout,
    Post(CreatePostRequest),
    Like(u64),
    Feed { json: bool },
    WhoAmI,
    Help,
    Quit,
}

pub enum Outcome {
    Continue(Vec<String>),
    Quit,
}

/// Parse one input line. Blank lines yield `None`.
pub fn parse(line: &str) -> Result<Option<Command>> {
    let line = line.trim();
    let (verb, rest) = match line.split_once(char::is_whitespace) {
        Some((verb, rest)) => (verb, rest.trim()),
        None => (line, ""),
    };

    let command = match verb {
        "" => return Ok(None),
        "login" => {
            let mut args = rest.split_whitespace();
            match (args.next(), args.next(), args.next()) {
                (Some(identifier), Some(secret), None) => Command::Login(LoginRequest {
                    identifier: identifier.to_string(),
                    secret: secret.to_string(),
                }),
                _ => bail!("usage: login <identifier> <secret>"),
            }
        }
        "signup" => {
            let (fields, bio) = match rest.split_once('|') {
                Some((fields, bio)) => (fields, Some(bio.trim().to_string())),
                None => (rest, None),
            };
            let (identifier, rest) = next_word(fields);
            let (secret, name) = next_word(rest);
            if identifier.is_empty() || secret.is_empty() || name.is_empty() {
                bail!("usage: signup <identifier> <secret> <display name...> [| <bio...>]");
            }
            Command::Signup(SignupRequest {
                display_name: name.to_string(),
                identifier: identifier.to_string(),
                secret: secret.to_string(),
                bio,
            })
        }
        "logout" => Command::Logout,
        "post" => Command::Post(CreatePostRequest {
            body: rest.to_string(),
            image_ref: None,
        }),
        "post-image" => match rest.split_once(char::is_whitespace) {
            Some((image_ref, body)) => Command::Post(CreatePostRequest {
                body: body.trim().to_string(),
                image_ref: Some(image_ref.to_string()),
            }),
            None => bail!("usage: post-image <image ref> <body...>"),
        },
        "like" => match rest.parse() {
            Ok(id) => Command::Like(id),
            Err(_) => bail!("usage: like <post id>"),
        },
        "feed" => match rest {
            "" => Command::Feed { json: false },
            "json" => Command::Feed { json: true },
            _ => bail!("usage: feed [json]"),
        },
        "whoami" => Command::WhoAmI,
        "help" | "?" => Command::Help,
        "quit" | "exit" => Command::Quit,
        other => bail!("unknown command {:?} (try \"help\")", other),
    };
    Ok(Some(command))
}

/// Split off the first whitespace-separated word; the rest comes back trimmed.
fn next_word(input: &str) -> (&str, &str) {
    let input = input.trim();
    match input.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (input, ""),
    }
}

/// Run one command. Rejections from the core become output lines; only
/// internal failures are returned as errors.
pub fn execute<V: CredentialVerifier>(
    hub: &mut Hub<V>,
    command: Command,
    now: DateTime<Utc>,
) -> Result<Outcome> {
    let signed_in = hub.session().is_authenticated();

    let lines = match command {
        Command::Quit => return Ok(Outcome::Quit),
        Command::Help => HELP.lines().map(str::to_string).collect(),
        Command::Login(request) => session_lines(hub.login(&request))?,
        Command::Signup(request) => session_lines(hub.signup(&request))?,
        Command::Logout => {
            hub.logout();
            vec!["Signed out.".to_string()]
        }
        Command::WhoAmI => match hub.session() {
            Session::Authenticated(profile) => vec![
                format!("{} {} (#{})", profile.display_name, profile.handle, profile.id),
                format!("  {}", profile.bio),
            ],
            Session::Unauthenticated => vec!["Not signed in.".to_string()],
        },
        _ if !signed_in => vec!["Sign in first: use \"login\" or \"signup\".".to_string()],
        Command::Post(request) => match hub.publish(&request) {
            Ok(post) => vec![format!("Posted #{}.", post.id)],
            Err(e) => rejection(e)?,
        },
        Command::Like(post_id) => match hub.like(post_id)? {
            Some(count) => vec![format!("#{} now has {} likes.", post_id, count)],
            None => vec![],
        },
        Command::Feed { json: true } => vec![serde_json::to_string_pretty(&hub.feed()?)?],
        Command::Feed { json: false } => {
            if hub.feed_store().is_empty()? {
                vec!["The feed is empty.".to_string()]
            } else {
                hub.feed()?
                    .iter()
                    .flat_map(|post| render_post(post, now))
                    .collect()
            }
        }
    };
    Ok(Outcome::Continue(lines))
}

fn session_lines(result: socialconnect_core::Result<Session>) -> Result<Vec<String>> {
    match result {
        Ok(session) => Ok(session
            .active_profile()
            .map(|p| vec![format!("Signed in as {} {}.", p.display_name, p.handle)])
            .unwrap_or_default()),
        Err(e) => rejection(e),
    }
}

fn rejection(err: CoreError) -> Result<Vec<String>> {
    match err {
        CoreError::Internal(_) => Err(err.into()),
        other => Ok(vec![format!("Rejected: {}", other)]),
    }
}

pub fn render_post(post: &Post, now: DateTime<Utc>) -> Vec<String> {
    let mut lines = vec![
        format!(
            "#{} {} {} · {}",
            post.id,
            post.author.display_name,
            post.author.handle,
            post.age_label(now)
        ),
        format!("   {}", post.author.bio),
    ];
    lines.extend(post.body.lines().map(|line| format!("   {}", line)));
    if let Some(image_ref) = &post.image_ref {
        lines.push(format!("   [image] {}", image_ref));
    }
    lines.push(format!("   ♥ {}", post.like_count));
    lines
}

/// Collect every notification waiting on `rx` as toast lines.
pub fn drain_toasts(rx: &mut Receiver<Notification>) -> Vec<String> {
    let mut toasts = Vec::new();
    loop {
        match rx.try_recv() {
            Ok(event) => toasts.push(format!("* {} {}", event.headline(), event.detail())),
            Err(TryRecvError::Lagged(skipped)) => {
                warn!("Toast receiver lagged, skipped {} notifications", skipped);
            }
            Err(TryRecvError::Empty | TryRecvError::Closed) => break,
        }
    }
    toasts
}

pub fn prompt(session: &Session) -> String {
    match session.active_profile() {
        Some(profile) => format!("{}> ", profile.handle),
        None => "(signed out)> ".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use socialconnect_core::{DemoVerifier, Dispatcher};

    fn hub() -> Hub<DemoVerifier> {
        Hub::new(DemoVerifier::new(), Dispatcher::new())
    }

    fn run(hub: &mut Hub<DemoVerifier>, line: &str) -> Vec<String> {
        let command = parse(line).unwrap().unwrap();
        match execute(hub, command, Utc::now()).unwrap() {
            Outcome::Continue(lines) => lines,
            Outcome::Quit => panic!("unexpected quit"),
        }
    }

    #[test]
    fn parses_signup_with_bio() {
        let Some(Command::Signup(req)) =
            parse("signup jane@example.com pw Jane  Roe | Painter and baker").unwrap()
        else {
            panic!("expected signup");
        };
        assert_eq!(req.identifier, "jane@example.com");
        assert_eq!(req.secret, "pw");
        assert_eq!(req.display_name, "Jane  Roe");
        assert_eq!(req.bio.as_deref(), Some("Painter and baker"));
    }

    #[test]
    fn parses_signup_with_extra_spaces() {
        let Some(Command::Signup(req)) =
            parse("signup  jane@example.com  pw   Jane Roe  |  Painter ").unwrap()
        else {
            panic!("expected signup");
        };
        assert_eq!(req.identifier, "jane@example.com");
        assert_eq!(req.secret, "pw");
        assert_eq!(req.display_name, "Jane Roe");
        assert_eq!(req.bio.as_deref(), Some("Painter"));

        let mut hub = hub();
        let lines = run(&mut hub, "signup jane@example.com  pw Jane Roe");
        assert_eq!(lines, vec!["Signed in as Jane Roe @jane_roe."]);
    }

    #[test]
    fn empty_feed_is_reported() {
        let mut hub = hub();
        run(&mut hub, "login john@example.com pw");
        assert_eq!(run(&mut hub, "feed"), vec!["The feed is empty."]);
    }

    #[test]
    fn parses_post_variants() {
        let Some(Command::Post(req)) = parse("post  hello there ").unwrap() else {
            panic!("expected post");
        };
        assert_eq!(req.body, "hello there");
        assert!(req.image_ref.is_none());

        let Some(Command::Post(req)) = parse("post-image media/cat.png look at him").unwrap()
        else {
            panic!("expected post");
        };
        assert_eq!(req.image_ref.as_deref(), Some("media/cat.png"));
        assert_eq!(req.body, "look at him");
    }

    #[test]
    fn rejects_malformed_lines() {
        assert!(parse("   ").unwrap().is_none());
        assert!(parse("login onlyone").is_err());
        assert!(parse("signup a b").is_err());
        assert!(parse("like seven").is_err());
        assert!(parse("dance").is_err());
    }

    #[test]
    fn signed_out_viewer_only_sees_auth_screen() {
        let mut hub = hub();
        let lines = run(&mut hub, "feed");
        assert!(lines[0].starts_with("Sign in first"));
        run(&mut hub, "post hello");
        assert!(hub.feed().unwrap().is_empty());
    }

    #[test]
    fn full_session_round() {
        let mut hub = hub();
        let mut rx = hub.subscribe();

        let lines = run(&mut hub, "signup jane@example.com pw Jane Roe");
        assert_eq!(lines, vec!["Signed in as Jane Roe @jane_roe."]);

        assert_eq!(run(&mut hub, "post hello world"), vec!["Posted #1."]);
        assert_eq!(run(&mut hub, "like 1"), vec!["#1 now has 1 likes."]);
        assert!(run(&mut hub, "like 99").is_empty());

        let feed = run(&mut hub, "feed");
        assert!(feed[0].starts_with("#1 Jane Roe @jane_roe · Just now"));
        assert!(feed.iter().any(|l| l.trim() == "♥ 1"));

        let toasts = drain_toasts(&mut rx);
        assert_eq!(toasts.len(), 3);
        assert!(toasts[0].contains("Account created!"));
        assert!(toasts[2].contains("Post liked!"));

        assert_eq!(prompt(hub.session()), "@jane_roe> ");
        run(&mut hub, "logout");
        assert_eq!(prompt(hub.session()), "(signed out)> ");
    }

    #[test]
    fn blank_post_is_reported() {
        let mut hub = hub();
        run(&mut hub, "login john@example.com pw");
        let lines = run(&mut hub, "post");
        assert!(lines[0].starts_with("Rejected: validation error"));
    }

    #[test]
    fn feed_json_is_valid() {
        let mut hub = hub();
        run(&mut hub, "login john@example.com pw");
        run(&mut hub, "post-image media/a.png with picture");

        let lines = run(&mut hub, "feed json");
        let value: serde_json::Value = serde_json::from_str(&lines[0]).unwrap();
        assert_eq!(value[0]["image_ref"], "media/a.png");
        assert_eq!(value[0]["author"]["handle"], "@john_doe");
    }

    #[test]
    fn quit_stops_the_loop() {
        let mut hub = hub();
        let command = parse("quit").unwrap().unwrap();
        assert!(matches!(
            execute(&mut hub, command, Utc::now()).unwrap(),
            Outcome::Quit
        ));
    }
}
