//! Naming collaborator - word-form derivation for model and field names
//!
//! Association criteria derive the owner's model name from its collection
//! name (`photos` -> `Photo`), and plural accessors derive collection
//! wording from a model name. Implementations must be deterministic and
//! side-effect free.

/// Word-form derivation used when computing model names and accessor wording
pub trait Inflector: Send + Sync {
    /// Reduce a word to its singular form (`photos` -> `photo`)
    fn singularize(&self, word: &str) -> String;

    /// Expand a word to its plural form (`photo` -> `photos`)
    fn pluralize(&self, word: &str) -> String;

    /// Derive a model type name from a word (`photo` -> `Photo`)
    fn classify(&self, word: &str) -> String;
}

/// Default English-convention inflector
#[derive(Debug, Clone, Copy, Default)]
pub struct EnglishInflector;

impl Inflector for EnglishInflector {
    fn singularize(&self, word: &str) -> String {
        if word.ends_with("ies") {
            format!("{}y", &word[..word.len() - 3])
        } else if word.ends_with("ses")
            || word.ends_with("ches")
            || word.ends_with("shes")
            || word.ends_with("xes")
            || word.ends_with("zes")
        {
            word[..word.len() - 2].to_string()
        } else if word.ends_with('s') && word.len() > 1 {
            word[..word.len() - 1].to_string()
        } else {
            word.to_string()
        }
    }

    fn pluralize(&self, word: &str) -> String {
        if word.ends_with('y')
            && !word.ends_with("ay")
            && !word.ends_with("ey")
            && !word.ends_with("iy")
            && !word.ends_with("oy")
            && !word.ends_with("uy")
        {
            format!("{}ies", &word[..word.len() - 1])
        } else if word.ends_with('s')
            || word.ends_with("sh")
            || word.ends_with("ch")
            || word.ends_with('x')
            || word.ends_with('z')
        {
            format!("{}es", word)
        } else {
            format!("{}s", word)
        }
    }

    fn classify(&self, word: &str) -> String {
        let mut result = String::with_capacity(word.len());
        let mut uppercase_next = true;
        for c in word.chars() {
            if c == '_' || c == '-' {
                uppercase_next = true;
            } else if uppercase_next {
                result.extend(c.to_uppercase());
                uppercase_next = false;
            } else {
                result.push(c);
            }
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_singularization() {
        let inflector = EnglishInflector;
        assert_eq!(inflector.singularize("photos"), "photo");
        assert_eq!(inflector.singularize("passports"), "passport");
        assert_eq!(inflector.singularize("categories"), "category");
        assert_eq!(inflector.singularize("boxes"), "box");
        assert_eq!(inflector.singularize("photo"), "photo");
        // A bare "s" is left alone rather than reduced to nothing
        assert_eq!(inflector.singularize("s"), "s");
    }

    #[test]
    fn test_pluralization() {
        let inflector = EnglishInflector;
        assert_eq!(inflector.pluralize("photo"), "photos");
        assert_eq!(inflector.pluralize("category"), "categories");
        assert_eq!(inflector.pluralize("box"), "boxes");
        assert_eq!(inflector.pluralize("day"), "days");
    }

    #[test]
    fn test_classify() {
        let inflector = EnglishInflector;
        assert_eq!(inflector.classify("photo"), "Photo");
        assert_eq!(inflector.classify("passport"), "Passport");
        assert_eq!(inflector.classify("user_profile"), "UserProfile");
    }

    #[test]
    fn test_collection_to_model_name() {
        let inflector = EnglishInflector;
        let model = inflector.classify(&inflector.singularize("passports"));
        assert_eq!(model, "Passport");
    }
}
