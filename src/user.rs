use crate::list::DynamicList;

#[derive(Debug, Clone, Default)]
pub struct User {
    pub name: String,
    pub username: String,
    pub password: String,
    pub notifications: DynamicList<String>,
}

impl User {
    pub fn new(name: String, username: String, password: String) -> Self {
        User {
            name,
            username,
            password,
            notifications: DynamicList::new(),
        }
    }

    /// Parses a `name,username,password` line. Missing fields are left empty
    /// and anything after the third field is ignored.
    pub fn from_csv_line(line: &str) -> Self {
        let line = line.strip_suffix('\r').unwrap_or(line);
        let mut fields = line.split(',').map(str::to_string);
        let name = fields.next().unwrap_or_default();
        let username = fields.next().unwrap_or_default();
        let password = fields.next().unwrap_or_default();
        User::new(name, username, password)
    }

    pub fn to_csv_line(&self) -> String {
        format!("{},{},{}", self.name, self.username, self.password)
    }

    pub fn verify_credentials(&self, username: &str, password: &str) -> bool {
        self.username == username && self.password == password
    }

    pub fn notify(&mut self, message: String) {
        self.notifications.push(message);
    }
}
