#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Phone number(s) an SMS is addressed to.
///
/// Values are passed to IPPanel as given; no normalization happens here.
pub enum Recipient {
    One(String),
    Many(Vec<String>),
}

impl Recipient {
    /// `true` for a blank number or an empty list.
    pub fn is_empty(&self) -> bool {
        match self {
            Self::One(number) => number.trim().is_empty(),
            Self::Many(numbers) => numbers.is_empty(),
        }
    }

    /// Flatten into the list form used by the single-send endpoint.
    pub fn into_vec(self) -> Vec<String> {
        match self {
            Self::One(number) => vec![number],
            Self::Many(numbers) => numbers,
        }
    }
}

impl From<String> for Recipient {
    fn from(value: String) -> Self {
        Self::One(value)
    }
}

impl From<&str> for Recipient {
    fn from(value: &str) -> Self {
        Self::One(value.to_owned())
    }
}

impl From<Vec<String>> for Recipient {
    fn from(value: Vec<String>) -> Self {
        Self::Many(value)
    }
}

impl From<Vec<&str>> for Recipient {
    fn from(value: Vec<&str>) -> Self {
        Self::Many(value.into_iter().map(str::to_owned).collect())
    }
}

impl<const N: usize> From<[&str; N]> for Recipient {
    fn from(value: [&str; N]) -> Self {
        Self::Many(value.iter().map(|number| (*number).to_owned()).collect())
    }
}
