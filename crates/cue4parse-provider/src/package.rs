//! Package metadata returned by the CUE4Parse CLI

use serde::{Deserialize, Serialize};

/// An object exported by a package
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportInfo {
    /// Object name
    pub name: String,
    /// Class of the object
    pub class_name: String,
    /// Index of the outer object (0 for top-level objects)
    #[serde(default)]
    pub outer_index: i32,
}

impl ExportInfo {
    /// Whether the object sits directly under the package
    #[must_use]
    pub const fn is_top_level(&self) -> bool {
        self.outer_index == 0
    }
}

/// A package and the objects it exports
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageInfo {
    /// Package name or path
    pub name: String,
    /// Exported objects in package order
    #[serde(default)]
    pub exports: Vec<ExportInfo>,
}

impl PackageInfo {
    /// Find an export by exact name
    pub fn find_export(&self, name: &str) -> Option<&ExportInfo> {
        self.exports.iter().find(|e| e.name == name)
    }

    /// Exports of the given class, compared case-insensitively
    pub fn exports_of_class<'a>(
        &'a self,
        class_name: &'a str,
    ) -> impl Iterator<Item = &'a ExportInfo> + 'a {
        self.exports
            .iter()
            .filter(move |e| e.class_name.eq_ignore_ascii_case(class_name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> PackageInfo {
        serde_json::from_str(
            r#"{
                "name": "Game/Characters/Hero",
                "exports": [
                    {"name": "Hero", "class_name": "SkeletalMesh", "outer_index": 0},
                    {"name": "Hero_Skeleton", "class_name": "Skeleton", "outer_index": 0},
                    {"name": "Hero_LOD1", "class_name": "SkeletalMesh", "outer_index": 1}
                ]
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn test_deserialize_package() {
        let package = sample();
        assert_eq!(package.name, "Game/Characters/Hero");
        assert_eq!(package.exports.len(), 3);
        assert!(package.exports[0].is_top_level());
        assert!(!package.exports[2].is_top_level());
    }

    #[test]
    fn test_missing_fields_default() {
        let package: PackageInfo = serde_json::from_str(
            r#"{"name": "Empty", "exports": [{"name": "A", "class_name": "Texture2D"}]}"#,
        )
        .unwrap();
        assert_eq!(package.exports[0].outer_index, 0);

        let package: PackageInfo = serde_json::from_str(r#"{"name": "Bare"}"#).unwrap();
        assert!(package.exports.is_empty());
    }

    #[test]
    fn test_find_export() {
        let package = sample();
        assert_eq!(
            package.find_export("Hero_Skeleton").map(|e| e.class_name.as_str()),
            Some("Skeleton")
        );
        assert!(package.find_export("hero_skeleton").is_none());
    }

    #[test]
    fn test_exports_of_class() {
        let package = sample();
        let meshes: Vec<_> = package
            .exports_of_class("skeletalmesh")
            .map(|e| e.name.as_str())
            .collect();
        assert_eq!(meshes, vec!["Hero", "Hero_LOD1"]);
    }
}
