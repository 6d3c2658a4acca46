//! Regular-expression construction for the content-scanning tools

use regex::Regex;
use scout_foundation::{Error, Result};

/// Flags that modify how a user pattern is compiled
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PatternFlags {
    /// Prefix the pattern with `(?i)`
    pub ignore_case: bool,
    /// Anchor the pattern on word boundaries
    pub word_match: bool,
}

/// Compose the final regex source for a user pattern.
///
/// Word matching wraps the pattern in a non-capturing group so alternations stay
/// anchored and capture-group numbering is unchanged.
pub fn build_pattern(pattern: &str, flags: PatternFlags) -> String {
    let mut source = if flags.word_match {
        format!(r"\b(?:{})\b", pattern)
    } else {
        pattern.to_string()
    };

    if flags.ignore_case {
        source = format!("(?i){}", source);
    }

    source
}

/// Compile a user pattern, reporting failures as validation errors
pub fn compile_pattern(pattern: &str, flags: PatternFlags) -> Result<Regex> {
    if pattern.is_empty() {
        return Err(Error::validation("pattern must not be empty"));
    }

    Regex::new(&build_pattern(pattern, flags))
        .map_err(|e| Error::validation(format!("invalid regex pattern '{}': {}", pattern, e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_pattern_composition() {
        assert_eq!(build_pattern("test", PatternFlags::default()), "test");
        assert_eq!(
            build_pattern(
                "test",
                PatternFlags {
                    ignore_case: true,
                    word_match: true
                }
            ),
            r"(?i)\b(?:test)\b"
        );
    }

    #[test]
    fn test_ignore_case() {
        let flags = PatternFlags {
            ignore_case: true,
            ..PatternFlags::default()
        };
        let regex = compile_pattern("test", flags).unwrap();
        for line in ["TEST", "Test", "TeSt"] {
            assert!(regex.is_match(line), "{line} should match");
        }
    }

    #[test]
    fn test_word_match() {
        let flags = PatternFlags {
            word_match: true,
            ..PatternFlags::default()
        };
        let regex = compile_pattern("test", flags).unwrap();
        assert!(regex.is_match("test"));
        assert!(regex.is_match("the test"));
        assert!(!regex.is_match("testing"));
        assert!(!regex.is_match("test123"));
    }

    #[test]
    fn test_word_match_with_alternation() {
        let flags = PatternFlags {
            word_match: true,
            ..PatternFlags::default()
        };
        let regex = compile_pattern("cat|dog", flags).unwrap();
        assert!(regex.is_match("hot dog"));
        assert!(!regex.is_match("dogma"));
        assert!(!regex.is_match("concat"));
    }

    #[test]
    fn test_case_and_word_compose() {
        let flags = PatternFlags {
            ignore_case: true,
            word_match: true,
        };
        let regex = compile_pattern("test", flags).unwrap();
        assert!(regex.is_match("A TEST here"));
        assert!(!regex.is_match("TESTING"));
    }

    #[test]
    fn test_capture_numbering_preserved() {
        let flags = PatternFlags {
            word_match: true,
            ..PatternFlags::default()
        };
        let regex = compile_pattern(r"user: (\w+)", flags).unwrap();
        let caps = regex.captures("user: john").unwrap();
        assert_eq!(caps.len(), 2);
        assert_eq!(&caps[1], "john");
    }

    #[test]
    fn test_invalid_pattern_is_validation_error() {
        let err = compile_pattern("[invalid", PatternFlags::default()).unwrap_err();
        assert!(err.is_validation());
        assert!(compile_pattern("", PatternFlags::default())
            .unwrap_err()
            .is_validation());
    }
}
