//! Line-oriented front end. Parses commands, hands them to [`AppContext`]
//! and prints whatever the core reports back. No decisions are made here.

use crate::app::AppContext;
use crate::error::AppError;
use crate::models::{Emotion, Language, QUICK_PROMPTS};
use crate::services::{CaptureState, SessionPhase};
use std::str::FromStr;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Login,
    Callback(String),
    Logout,
    Camera,
    Snap,
    Retake,
    Cancel,
    Mood(Emotion),
    Prompt(String),
    Quick(usize),
    Language(Language),
    Artist(Option<String>),
    Generate,
    Retry,
    Remove(String),
    Name(String),
    Save(Option<String>),
    Show,
    Leave,
    Help,
    Quit,
}

impl FromStr for Command {
    type Err = String;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };

        let required = |what: &str| -> Result<String, String> {
            if rest.is_empty() {
                Err(format!("usage: {} <{}>", word, what))
            } else {
                Ok(rest.to_string())
            }
        };
        let optional = || (!rest.is_empty()).then(|| rest.to_string());

        match word.to_ascii_lowercase().as_str() {
            "login" => Ok(Command::Login),
            "callback" => Ok(Command::Callback(required("code")?)),
            "logout" => Ok(Command::Logout),
            "camera" => Ok(Command::Camera),
            "snap" => Ok(Command::Snap),
            "retake" => Ok(Command::Retake),
            "cancel" => Ok(Command::Cancel),
            "mood" => required("emotion")?.parse::<Emotion>().map(Command::Mood),
            "prompt" => Ok(Command::Prompt(rest.to_string())),
            "quick" => {
                let n: usize = required("number")?
                    .parse()
                    .map_err(|_| format!("'{}' is not a number", rest))?;
                if n == 0 || n > QUICK_PROMPTS.len() {
                    return Err(format!("pick a quick prompt between 1 and {}", QUICK_PROMPTS.len()));
                }
                Ok(Command::Quick(n - 1))
            }
            "lang" | "language" => required("language")?.parse::<Language>().map(Command::Language),
            "artist" => Ok(Command::Artist(optional())),
            "generate" | "gen" => Ok(Command::Generate),
            "retry" => Ok(Command::Retry),
            "rm" | "remove" => Ok(Command::Remove(required("song id")?)),
            "name" => Ok(Command::Name(rest.to_string())),
            "save" => Ok(Command::Save(optional())),
            "show" | "ls" => Ok(Command::Show),
            "leave" => Ok(Command::Leave),
            "help" | "?" => Ok(Command::Help),
            "quit" | "exit" => Ok(Command::Quit),
            "" => Err("type 'help' for commands".to_string()),
            other => Err(format!("unknown command '{}'", other)),
        }
    }
}

const HELP: &str = "\
login                 print the Spotify authorization URL
callback <code>       finish login with the code from the redirect
logout                forget the access token
camera | snap | retake | cancel
                      drive the camera and detect your emotion
mood <emotion>        pick Happy, Sad, Energetic, Calm, Romantic or Melancholic
prompt <text>         describe the playlist in your own words
quick <n>             use one of the quick prompts
lang <language>       English, Hindi, Spanish, Korean, Tamil or Telugu
artist [name]         prefer an artist (no name clears it)
generate | retry      ask for songs
rm <id>               drop a song from the list
name <text>           name the playlist
save [name]           save the playlist to Spotify
show | leave | quit";

/// Read commands from `input` until EOF or `quit`.
pub async fn run<R, W>(app: &AppContext, input: R, mut out: W) -> std::io::Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut lines = input.lines();
    out.write_all(b"moodlist ready, type 'help' for commands\n> ").await?;
    out.flush().await?;

    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            out.write_all(b"> ").await?;
            out.flush().await?;
            continue;
        }

        let reply = match line.parse::<Command>() {
            Ok(Command::Quit) => break,
            Ok(command) => execute(app, command).await,
            Err(usage) => usage,
        };

        let mut text = reply;
        if let Some(error) = app.errors.current().await {
            text.push_str(&format!("\n! {}", error.text));
        }
        out.write_all(text.as_bytes()).await?;
        out.write_all(b"\n> ").await?;
        out.flush().await?;
    }

    Ok(())
}

/// Apply one command and describe the outcome.
pub async fn execute(app: &AppContext, command: Command) -> String {
    match command {
        Command::Login => match app.auth.begin_login().await {
            Ok(url) => format!("Open this URL and paste the code back with 'callback':\n{}", url),
            Err(_) => String::new(),
        },
        Command::Callback(code) => match app.auth.complete_login(&code).await {
            Ok(()) => "Logged in with Spotify".to_string(),
            Err(_) => String::new(),
        },
        Command::Logout => match app.logout().await {
            Ok(()) => "Logged out".to_string(),
            Err(e) => e.user_message(),
        },
        Command::Camera => match app.start_camera().await {
            Ok(()) => "Camera ready, 'snap' to take a photo".to_string(),
            Err(_) => String::new(),
        },
        Command::Snap => match app.take_photo().await {
            Ok(Some(emotion)) => format!("Detected emotion: {}", emotion),
            Ok(None) => format!("Nothing to capture ({})", app.capture.state().await.name()),
            Err(AppError::Abandoned) => "Photo discarded".to_string(),
            Err(_) => String::new(),
        },
        Command::Retake => {
            if app.retake_photo().await {
                "Camera ready, 'snap' to take a photo".to_string()
            } else {
                "No photo to retake".to_string()
            }
        }
        Command::Cancel => {
            if app.cancel_camera().await {
                "Camera closed".to_string()
            } else {
                "Camera is not open".to_string()
            }
        }
        Command::Mood(emotion) => {
            app.select_emotion(emotion).await;
            format!("Mood set to {}", emotion)
        }
        Command::Prompt(text) => {
            app.describe(&text).await;
            match app.resolver.current().await {
                Some(mood) => format!("Using {}", mood),
                None => "Prompt cleared".to_string(),
            }
        }
        Command::Quick(index) => match app.use_quick_prompt(index).await {
            Some(prompt) => format!("{}: {}", prompt.title, prompt.description),
            None => "No such quick prompt".to_string(),
        },
        Command::Language(language) => {
            app.session.set_language(language).await;
            format!("Language set to {}", language)
        }
        Command::Artist(artist) => {
            app.session.set_artist(artist).await;
            match app.session.snapshot().await.artist {
                Some(artist) => format!("Preferring {}", artist),
                None => "No preferred artist".to_string(),
            }
        }
        Command::Generate => match app.generate().await {
            Ok(_) => render_session(app).await,
            Err(AppError::Busy) => "Still working on the last request".to_string(),
            Err(_) => String::new(),
        },
        Command::Retry => match app.session.retry_generation().await {
            Ok(_) => render_session(app).await,
            Err(AppError::Busy) => "Still working on the last request".to_string(),
            Err(_) => String::new(),
        },
        Command::Remove(id) => {
            if app.session.remove_song(&id).await {
                render_session(app).await
            } else {
                format!("No song '{}' in the list", id)
            }
        }
        Command::Name(name) => {
            app.session.set_playlist_name(&name).await;
            format!("Playlist name: {}", name.trim())
        }
        Command::Save(name) => {
            let name = match name {
                Some(name) => name,
                None => app.session.snapshot().await.draft_name,
            };
            match app.save(&name).await {
                Ok(confirmation) => match confirmation.external_url {
                    Some(url) => format!("Playlist created successfully! {}", url),
                    None => "Playlist created successfully! Check your Spotify account.".to_string(),
                },
                Err(AppError::Busy) => "Still working on the last request".to_string(),
                Err(_) => String::new(),
            }
        }
        Command::Show => render_session(app).await,
        Command::Leave => {
            app.leave().await;
            "Left the playlist flow".to_string()
        }
        Command::Help => HELP.to_string(),
        Command::Quit => String::new(),
    }
}

async fn render_session(app: &AppContext) -> String {
    let snapshot = app.session.snapshot().await;
    let mut lines = Vec::new();

    let login = if app.auth.is_logged_in().await {
        "logged in"
    } else {
        "not logged in"
    };
    let mood = match app.resolver.current().await {
        Some(mood) => mood.to_string(),
        None => "no mood".to_string(),
    };
    let camera = match app.capture.state().await {
        CaptureState::Idle => String::new(),
        other => format!(", camera {}", other.name()),
    };
    lines.push(format!(
        "[{}, {}, {}{}]",
        login, mood, snapshot.language, camera
    ));

    match snapshot.phase {
        SessionPhase::Empty if snapshot.songs.is_empty() => {
            lines.push("No songs yet, 'generate' to get some".to_string())
        }
        SessionPhase::Generating => lines.push("Generating...".to_string()),
        SessionPhase::Saving => lines.push("Saving...".to_string()),
        _ => {
            for song in &snapshot.songs {
                lines.push(format!("  {}  {} - {}", song.id, song.title, song.artist));
            }
            if !snapshot.songs.is_empty() {
                let name = if snapshot.draft_name.trim().is_empty() {
                    "(unnamed)"
                } else {
                    snapshot.draft_name.as_str()
                };
                lines.push(format!("Playlist: {}", name));
            }
        }
    }

    lines.join("\n")
}
