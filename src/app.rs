use std::io;

use log::{debug, info};
use thiserror::Error;

use crate::config::{Config, ReloadMode};
use crate::list::{DynamicList, ListError};
use crate::storage::{CurrentUserRecord, FileStore};
use crate::user::User;

#[derive(Error, Debug)]
pub enum SocialError {
    #[error("Failed to open {context}: {source}")]
    Io {
        context: &'static str,
        #[source]
        source: io::Error,
    },
    #[error("Username already exists")]
    DuplicateUsername,
    #[error("Invalid username or password")]
    InvalidCredentials,
    #[error("No user logged in")]
    NoActiveSession,
    #[error("User not found")]
    UserNotFound,
    #[error(transparent)]
    List(#[from] ListError),
}

impl SocialError {
    fn io(context: &'static str) -> impl FnOnce(io::Error) -> Self {
        move |source| SocialError::Io { context, source }
    }
}

/// In-memory user registry with a single optional session, backed by the
/// users file and the shared current-user file.
pub struct SocialApp {
    users: DynamicList<User>,
    store: FileStore,
    reload_mode: ReloadMode,
    session: Option<usize>,
}

impl SocialApp {
    pub fn new(config: &Config) -> Result<Self, SocialError> {
        let store = FileStore::new(
            config.users_file.clone(),
            config.current_user_file.clone(),
        );
        Self::with_store(store, config.reload_mode)
    }

    /// Loads every user from the store's users file.
    pub fn with_store(store: FileStore, reload_mode: ReloadMode) -> Result<Self, SocialError> {
        let users = store
            .load_users()
            .map_err(SocialError::io("initial users file"))?;
        info!(
            "Loaded {} users from {}",
            users.len(),
            store.users_path().display()
        );
        Ok(SocialApp {
            users,
            store,
            reload_mode,
            session: None,
        })
    }

    pub fn users(&self) -> &DynamicList<User> {
        &self.users
    }

    pub fn current_user(&self) -> Option<&User> {
        self.session.and_then(|index| self.users.get(index).ok())
    }

    pub fn sign_up(&mut self, name: &str, username: &str, password: &str) -> Result<(), SocialError> {
        if self.find_user(username).is_some() {
            return Err(SocialError::DuplicateUsername);
        }

        let user = User::new(name.to_string(), username.to_string(), password.to_string());
        self.users.push(user.clone());
        self.store
            .append_user(&user)
            .map_err(SocialError::io("initial users file for appending"))?;
        info!("Signed up {username}");
        Ok(())
    }

    pub fn log_in(&mut self, username: &str, password: &str) -> Result<(), SocialError> {
        let index = self
            .users
            .position(|user| user.verify_credentials(username, password))
            .ok_or(SocialError::InvalidCredentials)?;
        self.session = Some(index);

        if self.store.current_user_exists() {
            let lines = self
                .store
                .read_current_user()
                .map_err(SocialError::io("current user file"))?;
            let user = self.users.get_mut(index)?;
            restore_notifications(user, lines, self.reload_mode);
        }

        info!("{username} logged in");
        Ok(())
    }

    pub fn log_out(&mut self) -> Result<(), SocialError> {
        let index = self.session_index()?;
        self.save_session(index)?;
        self.session = None;
        info!("{} logged out", self.users.get(index)?.username);
        Ok(())
    }

    pub fn create_post(&mut self, text: &str) -> Result<(), SocialError> {
        let index = self.session_index()?;
        let user = self.users.get_mut(index)?;
        user.notify(format!("You created a post: {text}"));
        info!("{} created a post", user.username);
        self.save_session(index)
    }

    /// Notifies `username` in memory only. The target's file is not written.
    pub fn send_follow_request(&mut self, username: &str) -> Result<(), SocialError> {
        let index = self.session_index()?;
        let follower = self.users.get(index)?.username.clone();
        let target = self.find_user(username).ok_or(SocialError::UserNotFound)?;
        self.users
            .get_mut(target)?
            .notify(format!("{follower} followed you"));
        info!("{follower} followed {username}");
        Ok(())
    }

    pub fn view_notifications(&self) -> Result<&DynamicList<String>, SocialError> {
        let index = self.session_index()?;
        Ok(&self.users.get(index)?.notifications)
    }

    fn session_index(&self) -> Result<usize, SocialError> {
        self.session.ok_or(SocialError::NoActiveSession)
    }

    fn find_user(&self, username: &str) -> Option<usize> {
        self.users.position(|user| user.username == username)
    }

    fn save_session(&self, index: usize) -> Result<(), SocialError> {
        self.store
            .save_current_user(self.users.get(index)?)
            .map_err(SocialError::io("current user file for saving"))
    }
}

fn restore_notifications(user: &mut User, lines: Vec<String>, mode: ReloadMode) {
    match mode {
        ReloadMode::Legacy => {
            debug!("Appending {} saved lines to {}", lines.len(), user.username);
            for line in lines {
                user.notify(line);
            }
        }
        ReloadMode::Strict => match CurrentUserRecord::parse(&lines) {
            Some(record) if record.username == user.username => {
                debug!(
                    "Merging {} saved notifications for {}",
                    record.notifications.len(),
                    user.username
                );
                user.notifications = merge_saved(&user.notifications, record.notifications);
            }
            _ => debug!("Saved session does not belong to {}", user.username),
        },
    }
}

/// Saved notifications followed by whatever is held in memory beyond the
/// prefix the two lists share.
fn merge_saved(in_memory: &DynamicList<String>, saved: Vec<String>) -> DynamicList<String> {
    let shared = in_memory
        .iter()
        .zip(&saved)
        .take_while(|(held, stored)| held == stored)
        .count();
    let unsaved: Vec<String> = in_memory.iter().skip(shared).cloned().collect();
    saved.into_iter().chain(unsaved).collect()
}
