//! Identifier source port and its default implementation.

use uuid::Uuid;

/// Namespace for name-derived identifiers.
const NAME_NAMESPACE: Uuid = Uuid::from_u128(0x6f72_6765_6673_4e00_8000_0000_0000_0001);

/// Port that produces identifiers for generated project files.
pub trait UuidSource: Send + Sync {
    /// Produce an identifier.
    ///
    /// With a name the identifier must be derived from it, so the same name
    /// always yields the same identifier; without one it is random.
    fn generate(&self, name: Option<&str>) -> Uuid;
}

/// Random v4 identifiers for anonymous requests, SHA-1 (v5) identifiers
/// derived from the name otherwise.
#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultUuidSource;

impl UuidSource for DefaultUuidSource {
    fn generate(&self, name: Option<&str>) -> Uuid {
        match name {
            Some(name) => Uuid::new_v5(&NAME_NAMESPACE, name.as_bytes()),
            None => Uuid::new_v4(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_named_ids_are_stable() {
        let source = DefaultUuidSource;
        assert_eq!(source.generate(Some("MyProject")), source.generate(Some("MyProject")));
        assert_ne!(source.generate(Some("MyProject")), source.generate(Some("Other")));
    }

    #[test]
    fn test_anonymous_ids_are_random() {
        let source = DefaultUuidSource;
        assert_ne!(source.generate(None), source.generate(None));
    }
}
