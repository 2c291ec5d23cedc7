use include_dir::{include_dir, Dir};
use itertools::Itertools;
use serde::Deserialize;
use serde_json::from_str;
use std::collections::HashMap;

static QUESTION_DIR: Dir = include_dir!("src/questions");

/// Fallback pair used whenever a (role, difficulty) combination has no
/// question set of its own. The bundled data must always populate it.
pub const DEFAULT_ROLE: &str = "software-engineer";
pub const DEFAULT_DIFFICULTY: &str = "intermediate";

#[derive(Deserialize, Clone, Debug, PartialEq)]
pub struct QuestionRecord {
    pub prompt: String,
    pub category: String,
    pub recommended_secs: u32,
    pub tips: Vec<String>,
}

#[derive(Deserialize, Clone, Debug)]
struct RoleFile {
    role: String,
    label: String,
    difficulties: HashMap<String, Vec<QuestionRecord>>,
}

#[derive(Clone, Debug)]
struct RoleEntry {
    label: String,
    difficulties: HashMap<String, Vec<QuestionRecord>>,
}

/// All bundled interview questions, keyed by role and difficulty.
#[derive(Clone, Debug)]
pub struct QuestionBank {
    roles: HashMap<String, RoleEntry>,
}

impl QuestionBank {
    pub fn load() -> Self {
        let mut roles = HashMap::new();

        for file in QUESTION_DIR.files() {
            let contents = file
                .contents_utf8()
                .expect("Unable to interpret question file as a string");
            let parsed: RoleFile =
                from_str(contents).expect("Unable to deserialize question json");

            roles.insert(
                parsed.role,
                RoleEntry {
                    label: parsed.label,
                    difficulties: parsed.difficulties,
                },
            );
        }

        Self { roles }
    }

    /// Exact match on (role, difficulty), falling back to the default pair.
    pub fn lookup(&self, role: &str, difficulty: &str) -> &[QuestionRecord] {
        self.roles
            .get(role)
            .and_then(|entry| entry.difficulties.get(difficulty))
            .map(Vec::as_slice)
            .unwrap_or_else(|| self.default_sequence())
    }

    fn default_sequence(&self) -> &[QuestionRecord] {
        self.roles
            .get(DEFAULT_ROLE)
            .and_then(|entry| entry.difficulties.get(DEFAULT_DIFFICULTY))
            .expect("Default question set not bundled")
    }

    /// (identifier, display label) pairs for the role picker, sorted by id.
    pub fn roles(&self) -> Vec<(&str, &str)> {
        self.roles
            .iter()
            .map(|(id, entry)| (id.as_str(), entry.label.as_str()))
            .sorted_by_key(|(id, _)| *id)
            .collect()
    }

    pub fn role_label<'a>(&'a self, role: &'a str) -> &'a str {
        self.roles
            .get(role)
            .map(|entry| entry.label.as_str())
            .unwrap_or(role)
    }
}
