#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    SignUp,
    LogIn,
    LogOut,
    CreatePost,
    SendFollowRequest,
    ViewNotifications,
    Exit,
}

impl MenuChoice {
    pub const ALL: [MenuChoice; 7] = [
        MenuChoice::SignUp,
        MenuChoice::LogIn,
        MenuChoice::LogOut,
        MenuChoice::CreatePost,
        MenuChoice::SendFollowRequest,
        MenuChoice::ViewNotifications,
        MenuChoice::Exit,
    ];

    pub fn number(self) -> u8 {
        match self {
            MenuChoice::SignUp => 1,
            MenuChoice::LogIn => 2,
            MenuChoice::LogOut => 3,
            MenuChoice::CreatePost => 4,
            MenuChoice::SendFollowRequest => 5,
            MenuChoice::ViewNotifications => 6,
            MenuChoice::Exit => 7,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            MenuChoice::SignUp => "Sign Up",
            MenuChoice::LogIn => "Log In",
            MenuChoice::LogOut => "Log Out",
            MenuChoice::CreatePost => "Create a Post",
            MenuChoice::SendFollowRequest => "Send Follow Request",
            MenuChoice::ViewNotifications => "View Notifications",
            MenuChoice::Exit => "Exit",
        }
    }

    /// Reads a menu number from a line of input. Anything that is not one of
    /// the listed numbers yields `None`.
    pub fn parse(input: &str) -> Option<Self> {
        let number: u8 = input.split_whitespace().next()?.parse().ok()?;
        MenuChoice::ALL
            .into_iter()
            .find(|choice| choice.number() == number)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbers_round_trip() {
        for choice in MenuChoice::ALL {
            assert_eq!(MenuChoice::parse(&choice.number().to_string()), Some(choice));
        }
    }

    #[test]
    fn rejects_out_of_range_and_text() {
        assert_eq!(MenuChoice::parse("0"), None);
        assert_eq!(MenuChoice::parse("8"), None);
        assert_eq!(MenuChoice::parse("-1"), None);
        assert_eq!(MenuChoice::parse("two"), None);
        assert_eq!(MenuChoice::parse(""), None);
        assert_eq!(MenuChoice::parse("  4 \n"), Some(MenuChoice::CreatePost));
    }
}
