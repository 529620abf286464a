use std::fs::{File, OpenOptions};
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use log::debug;

use crate::list::DynamicList;
use crate::user::User;

pub const NOTIFICATIONS_MARKER: &str = "Notifications:";

/// Contents of the current-user file split into its sections.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrentUserRecord {
    pub username: String,
    pub notifications: Vec<String>,
}

impl CurrentUserRecord {
    /// Splits raw file lines into the owner's username and the notification
    /// section. Returns `None` when the file has no credential line.
    pub fn parse(lines: &[String]) -> Option<Self> {
        let (credentials, rest) = lines.split_first()?;
        let username = User::from_csv_line(credentials).username;
        let body = match rest.split_first() {
            Some((marker, body)) if marker == NOTIFICATIONS_MARKER => body,
            _ => rest,
        };
        Some(CurrentUserRecord {
            username,
            notifications: body.to_vec(),
        })
    }
}

/// Flat-file persistence for the user list and the shared current-user slot.
#[derive(Debug, Clone)]
pub struct FileStore {
    users_path: PathBuf,
    current_user_path: PathBuf,
}

impl FileStore {
    pub fn new(users_path: impl Into<PathBuf>, current_user_path: impl Into<PathBuf>) -> Self {
        FileStore {
            users_path: users_path.into(),
            current_user_path: current_user_path.into(),
        }
    }

    pub fn users_path(&self) -> &Path {
        &self.users_path
    }

    pub fn current_user_path(&self) -> &Path {
        &self.current_user_path
    }

    pub fn load_users(&self) -> io::Result<DynamicList<User>> {
        let users: DynamicList<User> = read_lines(&self.users_path)?
            .iter()
            .map(|line| User::from_csv_line(line))
            .collect();
        debug!("Loaded {} users from {}", users.len(), self.users_path.display());
        Ok(users)
    }

    pub fn append_user(&self, user: &User) -> io::Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.users_path)?;
        writeln!(file, "{}", user.to_csv_line())?;
        debug!("Appended {} to {}", user.username, self.users_path.display());
        Ok(())
    }

    pub fn current_user_exists(&self) -> bool {
        self.current_user_path.is_file()
    }

    pub fn read_current_user(&self) -> io::Result<Vec<String>> {
        let lines = read_lines(&self.current_user_path)?;
        debug!(
            "Read {} lines from {}",
            lines.len(),
            self.current_user_path.display()
        );
        Ok(lines)
    }

    /// Overwrites the current-user file with the user's credential line, the
    /// notifications marker and every notification.
    pub fn save_current_user(&self, user: &User) -> io::Result<()> {
        let mut writer = BufWriter::new(File::create(&self.current_user_path)?);
        writeln!(writer, "{}", user.to_csv_line())?;
        writeln!(writer, "{NOTIFICATIONS_MARKER}")?;
        for notification in &user.notifications {
            writeln!(writer, "{notification}")?;
        }
        writer.flush()?;
        debug!(
            "Saved {} notifications for {} to {}",
            user.notifications.len(),
            user.username,
            self.current_user_path.display()
        );
        Ok(())
    }
}

/// Lines without terminators. Invalid UTF-8 is replaced, not rejected.
fn read_lines(path: &Path) -> io::Result<Vec<String>> {
    let reader = BufReader::new(File::open(path)?);
    reader
        .split(b'\n')
        .map(|line| {
            let line = line?;
            let text = String::from_utf8_lossy(&line);
            Ok(text.strip_suffix('\r').unwrap_or(&text).to_string())
        })
        .collect()
}
