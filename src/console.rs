use std::io::{self, BufRead, Write};

use log::warn;

use crate::app::{SocialApp, SocialError};
use crate::menu::MenuChoice;

enum Step {
    Continue,
    Exit,
}

/// Menu loop over arbitrary input and output streams.
pub struct Console<R, W, E> {
    app: SocialApp,
    input: R,
    out: W,
    err: E,
}

impl<R: BufRead, W: Write, E: Write> Console<R, W, E> {
    pub fn new(app: SocialApp, input: R, out: W, err: E) -> Self {
        Console {
            app,
            input,
            out,
            err,
        }
    }

    /// Runs until the user picks Exit or input ends.
    pub fn run(&mut self) -> io::Result<()> {
        loop {
            self.print_menu()?;
            let Some(line) = self.read_line()? else {
                return Ok(());
            };

            let Some(choice) = MenuChoice::parse(&line) else {
                warn!("Ignoring menu input {:?}", line.trim());
                writeln!(self.out, "Invalid choice. Please try again.")?;
                continue;
            };

            if let Step::Exit = self.dispatch(choice)? {
                return Ok(());
            }
        }
    }

    fn print_menu(&mut self) -> io::Result<()> {
        writeln!(self.out, "Select one of the following options:")?;
        for choice in MenuChoice::ALL {
            writeln!(self.out, "{}- {}", choice.number(), choice.label())?;
        }
        write!(self.out, "Enter your choice: ")?;
        self.out.flush()
    }

    /// End of input inside a prompt abandons the operation and exits.
    fn dispatch(&mut self, choice: MenuChoice) -> io::Result<Step> {
        let result = match choice {
            MenuChoice::SignUp => {
                let Some(name) = self.prompt_word("Enter your name: ")? else {
                    return Ok(Step::Exit);
                };
                let Some(username) = self.prompt_word("Enter your username: ")? else {
                    return Ok(Step::Exit);
                };
                let Some(password) = self.prompt_word("Enter your password: ")? else {
                    return Ok(Step::Exit);
                };
                self.app
                    .sign_up(&name, &username, &password)
                    .map(|()| "Sign up successful!".to_string())
            }
            MenuChoice::LogIn => {
                let Some(username) = self.prompt_word("Enter your username: ")? else {
                    return Ok(Step::Exit);
                };
                let Some(password) = self.prompt_word("Enter your password: ")? else {
                    return Ok(Step::Exit);
                };
                self.app
                    .log_in(&username, &password)
                    .map(|()| format!("Logged in successfully as {username}"))
            }
            MenuChoice::LogOut => self
                .app
                .log_out()
                .map(|()| "Logged out successfully".to_string()),
            MenuChoice::CreatePost => {
                let Some(text) = self.prompt_line("Enter your post text: ")? else {
                    return Ok(Step::Exit);
                };
                self.app
                    .create_post(&text)
                    .map(|()| "Post created successfully".to_string())
            }
            MenuChoice::SendFollowRequest => {
                let Some(username) = self.prompt_word("Enter username to follow: ")? else {
                    return Ok(Step::Exit);
                };
                self.app
                    .send_follow_request(&username)
                    .map(|()| format!("Follow request sent to {username}"))
            }
            MenuChoice::ViewNotifications => self.app.view_notifications().map(|notifications| {
                let mut text = String::from("Notifications:");
                for notification in notifications {
                    text.push('\n');
                    text.push_str(notification);
                }
                text
            }),
            MenuChoice::Exit => return Ok(Step::Exit),
        };

        self.report(result)?;
        Ok(Step::Continue)
    }

    fn report(&mut self, result: Result<String, SocialError>) -> io::Result<()> {
        match result {
            Ok(message) => writeln!(self.out, "{message}"),
            Err(e) => {
                warn!("Operation failed: {e}");
                writeln!(self.err, "Error: {e}")
            }
        }
    }

    /// First whitespace-delimited token, skipping blank lines. `None` at end
    /// of input.
    fn prompt_word(&mut self, prompt: &str) -> io::Result<Option<String>> {
        write!(self.out, "{prompt}")?;
        self.out.flush()?;
        while let Some(line) = self.read_line()? {
            if let Some(word) = line.split_whitespace().next() {
                return Ok(Some(word.to_string()));
            }
        }
        Ok(None)
    }

    fn prompt_line(&mut self, prompt: &str) -> io::Result<Option<String>> {
        write!(self.out, "{prompt}")?;
        self.out.flush()?;
        self.read_line()
    }

    /// Reads one line without its terminator. Bytes that are not UTF-8 are
    /// replaced rather than rejected.
    fn read_line(&mut self) -> io::Result<Option<String>> {
        let mut bytes = Vec::new();
        if self.input.read_until(b'\n', &mut bytes)? == 0 {
            return Ok(None);
        }
        let line = String::from_utf8_lossy(&bytes);
        Ok(Some(line.trim_end_matches(['\n', '\r']).to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ReloadMode;
    use crate::storage::FileStore;
    use std::fs;
    use std::io::Cursor;
    use std::path::Path;
    use tempfile::tempdir;

    fn run_script(dir: &Path, script: &str) -> (String, String) {
        let store = FileStore::new(dir.join("initial_users.txt"), dir.join("current_user.txt"));
        if !store.users_path().exists() {
            fs::write(store.users_path(), "Alice,alice,pw1\n").expect("seed users");
        }
        let app = SocialApp::with_store(store, ReloadMode::Legacy).expect("app");

        let mut out = Vec::new();
        let mut err = Vec::new();
        Console::new(app, Cursor::new(script.to_string()), &mut out, &mut err)
            .run()
            .expect("console run");
        (
            String::from_utf8(out).expect("utf8 stdout"),
            String::from_utf8(err).expect("utf8 stderr"),
        )
    }

    #[test]
    fn full_session_scenario() {
        let dir = tempdir().expect("tempdir");
        let script = "1\nBob\nbob\npw2\n2\nbob\npw2\n4\nhello world\n6\n3\n7\n";
        let (out, err) = run_script(dir.path(), script);

        assert!(err.is_empty(), "unexpected errors: {err}");
        assert!(out.contains("Sign up successful!"));
        assert!(out.contains("Logged in successfully as bob"));
        assert!(out.contains("Post created successfully"));
        assert!(out.contains("Notifications:\nYou created a post: hello world\n"));
        assert!(out.contains("Logged out successfully"));

        let saved = fs::read_to_string(dir.path().join("current_user.txt")).expect("saved");
        assert_eq!(saved, "Bob,bob,pw2\nNotifications:\nYou created a post: hello world\n");
    }

    #[test]
    fn errors_go_to_error_stream_and_loop_continues() {
        let dir = tempdir().expect("tempdir");
        let (out, err) = run_script(dir.path(), "3\n5\nalice\n2\nalice\nnope\n1\nA\nalice\nx\n7\n");

        assert_eq!(
            err,
            "Error: No user logged in\n\
             Error: No user logged in\n\
             Error: Invalid username or password\n\
             Error: Username already exists\n"
        );
        assert_eq!(out.matches("Select one of the following options:").count(), 5);
    }

    #[test]
    fn invalid_choice_reprompts() {
        let dir = tempdir().expect("tempdir");
        let (out, err) = run_script(dir.path(), "9\nabc\n7\n");

        assert!(err.is_empty());
        assert_eq!(out.matches("Invalid choice. Please try again.").count(), 2);
        assert_eq!(out.matches("Enter your choice: ").count(), 3);
    }

    #[test]
    fn menu_lists_every_option() {
        let dir = tempdir().expect("tempdir");
        let (out, _) = run_script(dir.path(), "7\n");
        assert_eq!(
            out,
            "Select one of the following options:\n\
             1- Sign Up\n\
             2- Log In\n\
             3- Log Out\n\
             4- Create a Post\n\
             5- Send Follow Request\n\
             6- View Notifications\n\
             7- Exit\n\
             Enter your choice: "
        );
    }

    #[test]
    fn end_of_input_mid_prompt_exits_without_acting() {
        let dir = tempdir().expect("tempdir");
        let (out, err) = run_script(dir.path(), "2\nalice\n");

        assert!(err.is_empty());
        assert!(!out.contains("Logged in"));
        assert_eq!(out.matches("Select one of the following options:").count(), 1);

        let (out, err) = run_script(dir.path(), "1\n");
        assert!(err.is_empty());
        assert!(!out.contains("Sign up successful!"));
        let users = fs::read_to_string(dir.path().join("initial_users.txt")).expect("users");
        assert_eq!(users, "Alice,alice,pw1\n");
    }

    #[test]
    fn blank_lines_do_not_answer_word_prompts() {
        let dir = tempdir().expect("tempdir");
        let (out, err) = run_script(dir.path(), "1\n\n  \n\nCarol\n\ncarol\n\t\npw3\n7\n");

        assert!(err.is_empty(), "unexpected errors: {err}");
        assert!(out.contains("Sign up successful!"));
        let users = fs::read_to_string(dir.path().join("initial_users.txt")).expect("users");
        assert_eq!(users, "Alice,alice,pw1\nCarol,carol,pw3\n");

        let (_, _) = run_script(dir.path(), "1\n\n\n\n7\n");
        let users = fs::read_to_string(dir.path().join("initial_users.txt")).expect("users");
        assert_eq!(users, "Alice,alice,pw1\nCarol,carol,pw3\n");
    }

    #[test]
    fn non_utf8_input_is_replaced_not_fatal() {
        let dir = tempdir().expect("tempdir");
        let store = FileStore::new(
            dir.path().join("initial_users.txt"),
            dir.path().join("current_user.txt"),
        );
        fs::write(store.users_path(), "Alice,alice,pw1\n").expect("seed users");
        let app = SocialApp::with_store(store, ReloadMode::Legacy).expect("app");

        let input = b"2\nalice\npw1\n4\ncaf\xe9\n6\n7\n".to_vec();
        let mut out = Vec::new();
        let mut err = Vec::new();
        Console::new(app, Cursor::new(input), &mut out, &mut err)
            .run()
            .expect("console run");

        let out = String::from_utf8(out).expect("utf8 stdout");
        assert!(err.is_empty());
        assert!(out.contains("You created a post: caf\u{fffd}"));
    }

    #[test]
    fn follow_request_reaches_target_after_logout() {
        let dir = tempdir().expect("tempdir");
        fs::write(dir.path().join("initial_users.txt"), "Alice,alice,pw1\nBob,bob,pw2\n")
            .expect("seed users");
        let script = "2\nalice pw-ignored\npw1\n5\nbob\n3\n2\nbob\npw2\n6\n7\n";
        let (out, err) = run_script(dir.path(), script);

        assert!(err.is_empty(), "unexpected errors: {err}");
        assert!(out.contains("Follow request sent to bob"));
        assert!(out.contains("Notifications:\nalice followed you\n"));
    }
}
