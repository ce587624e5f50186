/// Identity of whoever issued the request, as handed over by the identity
/// provider. The core never validates credentials itself.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Viewer {
    #[default]
    Anonymous,
    User(i64),
}

impl Viewer {
    pub fn id(&self) -> Option<i64> {
        match self {
            Viewer::Anonymous => None,
            Viewer::User(id) => Some(*id),
        }
    }

    pub fn is_anonymous(&self) -> bool {
        matches!(self, Viewer::Anonymous)
    }
}

impl From<Option<i64>> for Viewer {
    fn from(value: Option<i64>) -> Self {
        value.map(Viewer::User).unwrap_or_default()
    }
}
