use serde::{Deserialize, Serialize};

/// The profile values completion is computed from.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileFields {
    pub avatar_set: bool,
    pub name: String,
    pub email: String,
    pub company: String,
    pub bio: String,
}

/// Profile completion progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ProfileCompletion {
    pub percent: u8,
    pub complete: usize,
    pub total: usize,
}

impl ProfileCompletion {
    pub fn compute(fields: &ProfileFields) -> Self {
        let has_value = |v: &str| !v.trim().is_empty();
        let checks = [
            fields.avatar_set,
            has_value(&fields.name),
            has_value(&fields.email),
            has_value(&fields.company),
            has_value(&fields.bio),
        ];

        let complete = checks.iter().filter(|&&c| c).count();
        let total = checks.len();
        // Integer round-half-up of complete / total * 100.
        let percent = ((complete * 200 + total) / (2 * total)) as u8;

        Self {
            percent,
            complete,
            total,
        }
    }

    /// `"60%"`, the progress bar's label and width.
    pub fn label(&self) -> String {
        format!("{}%", self.percent)
    }
}
