use serde::{Deserialize, Serialize};

/// Identity details supplied by the credential layer, used for display only.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserInfo {
    pub id: String,
    pub name: String,
    pub email: String,
}

impl UserInfo {
    pub fn display_name(&self) -> &str {
        let trimmed = self.name.trim();
        if trimmed.is_empty() {
            "User"
        } else {
            trimmed
        }
    }
}

/// Dashboard greeting; anonymous sessions are addressed as "User".
pub fn greeting(user: Option<&UserInfo>) -> String {
    format!("Hello, {}", user.map_or("User", UserInfo::display_name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn greets_by_name_or_fallback() {
        let user = UserInfo {
            id: "1".into(),
            name: "Ana".into(),
            email: "ana@example.com".into(),
        };
        assert_eq!(greeting(Some(&user)), "Hello, Ana");
        assert_eq!(greeting(None), "Hello, User");

        let blank = UserInfo {
            name: "  ".into(),
            ..user
        };
        assert_eq!(greeting(Some(&blank)), "Hello, User");
    }
}
