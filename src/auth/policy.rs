/// Access types a caller may hold on a topic
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Permission {
    Read,
    Write,
}

/// Answers whether a subject may act on a topic.
///
/// `subject = None` is an anonymous caller. `Ok` means allowed; denial is a
/// normal answer, not a failure of the policy.
pub trait Authorizer: Send + Sync {
    fn authorize(
        &self,
        subject: Option<&str>,
        topic: &str,
        permission: Permission,
    ) -> Result<(), AccessDenied>;
}

#[derive(Debug, thiserror::Error)]
#[error("access to topic {topic} denied")]
pub struct AccessDenied {
    pub topic: String,
}

/// Denies anonymous reads on protected topics.
///
/// Patterns match whole topic names; `*` matches any run of characters.
pub struct TopicPolicy {
    protected: Vec<String>,
}

impl TopicPolicy {
    pub fn new(patterns: Vec<String>) -> Self {
        Self {
            protected: patterns,
        }
    }

    fn is_protected(&self, topic: &str) -> bool {
        self.protected
            .iter()
            .any(|pattern| topic_matches_pattern(pattern, topic))
    }
}

impl Authorizer for TopicPolicy {
    fn authorize(
        &self,
        subject: Option<&str>,
        topic: &str,
        permission: Permission,
    ) -> Result<(), AccessDenied> {
        // Authenticated subjects are resolved upstream; the bridge only asks
        // about anonymous readers.
        if subject.is_none() && permission == Permission::Read && self.is_protected(topic) {
            return Err(AccessDenied {
                topic: topic.to_string(),
            });
        }
        Ok(())
    }
}

/// Check if a topic matches a pattern where `*` matches any run of characters
fn topic_matches_pattern(pattern: &str, topic: &str) -> bool {
    let pattern: Vec<char> = pattern.chars().collect();
    let topic: Vec<char> = topic.chars().collect();

    let mut pi = 0;
    let mut ti = 0;
    let mut star: Option<(usize, usize)> = None;

    while ti < topic.len() {
        if pi < pattern.len() && pattern[pi] == topic[ti] {
            pi += 1;
            ti += 1;
        } else if pi < pattern.len() && pattern[pi] == '*' {
            // Tentatively match zero characters; back up here if needed
            star = Some((pi, ti));
            pi += 1;
        } else if let Some((sp, st)) = star {
            pi = sp + 1;
            ti = st + 1;
            star = Some((sp, st + 1));
        } else {
            return false;
        }
    }

    while pi < pattern.len() && pattern[pi] == '*' {
        pi += 1;
    }

    pi == pattern.len()
}
