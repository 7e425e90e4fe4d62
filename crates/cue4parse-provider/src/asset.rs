//! Typed view of a package built from the CUE4Parse CLI's JSON output
//!
//! `Asset::from_provider` loads a package's export table and then exports
//! each object as JSON, converting every top-level field into a `Property`.

use crate::package::{ExportInfo, PackageInfo};
use crate::provider::Provider;
use cue4parse_common::{Error, GameVersion, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use tracing::{debug, warn};

/// Engine name: a string plus an instance number
///
/// A non-zero number is rendered as a `_N` suffix, so `FName::with_number("Wall", 2)`
/// displays as `Wall_2`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FName {
    pub name: String,
    #[serde(default)]
    pub number: u32,
}

impl FName {
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_number(name, 0)
    }

    pub fn with_number(name: impl Into<String>, number: u32) -> Self {
        Self {
            name: name.into(),
            number,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for FName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.number == 0 {
            f.write_str(&self.name)
        } else {
            write!(f, "{}_{}", self.name, self.number)
        }
    }
}

/// Reference into a package's import or export table
///
/// Zero is null, negative values are imports (`-1` is import 0) and
/// positive values are exports (`1` is export 0).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PackageIndex(pub i32);

impl PackageIndex {
    pub const fn null() -> Self {
        Self(0)
    }

    pub const fn is_null(&self) -> bool {
        self.0 == 0
    }

    pub const fn is_import(&self) -> bool {
        self.0 < 0
    }

    pub const fn is_export(&self) -> bool {
        self.0 > 0
    }

    /// Position in the import table, if this is an import
    #[must_use]
    pub fn import_index(&self) -> Option<usize> {
        if self.is_import() {
            usize::try_from(-(i64::from(self.0)) - 1).ok()
        } else {
            None
        }
    }

    /// Position in the export table, if this is an export
    #[must_use]
    pub fn export_index(&self) -> Option<usize> {
        if self.is_export() {
            usize::try_from(self.0 - 1).ok()
        } else {
            None
        }
    }

    pub fn from_import(index: usize) -> Result<Self> {
        i32::try_from(index)
            .ok()
            .and_then(|i| i.checked_add(1))
            .map(|i| Self(-i))
            .ok_or_else(|| Error::configuration(format!("import index {index} out of range")))
    }

    pub fn from_export(index: usize) -> Result<Self> {
        i32::try_from(index)
            .ok()
            .and_then(|i| i.checked_add(1))
            .map(Self)
            .ok_or_else(|| Error::configuration(format!("export index {index} out of range")))
    }
}

impl From<i32> for PackageIndex {
    fn from(value: i32) -> Self {
        Self(value)
    }
}

/// Object reference as CUE4Parse serializes it
///
/// `object_path` is `<package>.<export index>`, e.g. `Game/Hero.0`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectReference {
    pub object_name: String,
    pub object_path: String,
}

impl ObjectReference {
    /// Package part of the path
    pub fn package(&self) -> &str {
        self.object_path
            .rsplit_once('.')
            .map_or(self.object_path.as_str(), |(package, _)| package)
    }

    /// Export index encoded in the path suffix
    pub fn export_index(&self) -> Option<usize> {
        self.object_path
            .rsplit_once('.')
            .and_then(|(_, index)| index.parse().ok())
    }
}

/// Property value decoded from exported JSON
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Property {
    Bool(bool),
    Int32(i32),
    Int64(i64),
    Double(f64),
    String(String),
    Name(FName),
    /// Hard object reference; `None` for a null reference
    Object(Option<ObjectReference>),
    SoftObject {
        asset_path: String,
        sub_path: String,
    },
    Array(Vec<Property>),
    Struct {
        struct_type: FName,
        properties: BTreeMap<String, Property>,
    },
}

impl Property {
    /// Struct type used when the JSON carries no `$type`
    pub const DEFAULT_STRUCT_TYPE: &'static str = "StructProperty";

    /// Convert a JSON value, with an optional property type hint
    ///
    /// A hint of `Name` or `NameProperty` turns strings into names; without
    /// it every string is a plain `String`.
    pub fn from_json(value: &serde_json::Value, type_hint: Option<&str>) -> Self {
        use serde_json::Value;

        match value {
            Value::Null => Self::Object(None),
            Value::Bool(b) => Self::Bool(*b),
            Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    i32::try_from(i).map_or(Self::Int64(i), Self::Int32)
                } else {
                    // u64 beyond i64 or a fractional value
                    Self::Double(n.as_f64().unwrap_or(f64::NAN))
                }
            }
            Value::String(s) => match type_hint {
                Some("Name" | "NameProperty") => Self::Name(FName::new(s.as_str())),
                _ => Self::String(s.clone()),
            },
            Value::Array(items) => Self::Array(
                items
                    .iter()
                    .map(|item| Self::from_json(item, type_hint))
                    .collect(),
            ),
            Value::Object(map) => Self::from_json_object(map),
        }
    }

    fn from_json_object(map: &serde_json::Map<String, serde_json::Value>) -> Self {
        let text = |key: &str| map.get(key).and_then(serde_json::Value::as_str);

        if let (Some(object_name), Some(object_path)) = (text("ObjectName"), text("ObjectPath")) {
            return Self::Object(Some(ObjectReference {
                object_name: object_name.to_string(),
                object_path: object_path.to_string(),
            }));
        }
        if let Some(asset_path) = text("AssetPathName") {
            return Self::SoftObject {
                asset_path: asset_path.to_string(),
                sub_path: text("SubPathString").unwrap_or_default().to_string(),
            };
        }

        let struct_type = FName::new(text("$type").unwrap_or(Self::DEFAULT_STRUCT_TYPE));
        let properties = map
            .iter()
            .filter(|(key, _)| !key.starts_with('$'))
            .map(|(key, value)| (key.clone(), Self::from_json(value, None)))
            .collect();
        Self::Struct {
            struct_type,
            properties,
        }
    }

    /// Engine type name of this value
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::Bool(_) => "BoolProperty",
            Self::Int32(_) => "IntProperty",
            Self::Int64(_) => "Int64Property",
            Self::Double(_) => "DoubleProperty",
            Self::String(_) => "StrProperty",
            Self::Name(_) => "NameProperty",
            Self::Object(_) => "ObjectProperty",
            Self::SoftObject { .. } => "SoftObjectProperty",
            Self::Array(_) => "ArrayProperty",
            Self::Struct { .. } => "StructProperty",
        }
    }

    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Integer value, widening `Int32`
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Int32(i) => Some(i64::from(*i)),
            Self::Int64(i) => Some(*i),
            _ => None,
        }
    }

    /// Text of a string or name
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            Self::Name(name) => Some(name.as_str()),
            _ => None,
        }
    }
}

/// One export with its decoded properties
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AssetExport {
    pub object_name: FName,
    pub class_name: String,
    pub outer_index: PackageIndex,
    pub properties: BTreeMap<String, Property>,
}

impl AssetExport {
    /// Build an export from its table entry and exported JSON
    ///
    /// Only JSON objects carry properties; anything else leaves the export
    /// without properties.
    pub fn from_json(info: &ExportInfo, json: &serde_json::Value) -> Self {
        let properties = json
            .as_object()
            .map(|map| {
                map.iter()
                    .map(|(key, value)| (key.clone(), Property::from_json(value, None)))
                    .collect()
            })
            .unwrap_or_default();

        Self {
            object_name: FName::new(info.name.as_str()),
            class_name: info.class_name.clone(),
            outer_index: PackageIndex(info.outer_index),
            properties,
        }
    }

    pub fn property(&self, name: &str) -> Option<&Property> {
        self.properties.get(name)
    }
}

/// A package with its exports and their properties
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Asset {
    pub name: String,
    pub game_version: GameVersion,
    pub exports: Vec<AssetExport>,
}

impl Asset {
    /// Load a package and export every object in it
    ///
    /// An object the tool fails to export, or whose output is not JSON, is
    /// kept without properties. Input and spawn errors abort the load.
    pub fn from_provider(provider: &Provider, package_path: &str) -> Result<Self> {
        let package = provider.load_package(package_path)?;
        let mut exports = Vec::with_capacity(package.exports.len());

        for info in &package.exports {
            let object_path = format!("{}.{}", package.name, info.name);
            let json = match provider.export_object_json(&object_path) {
                Ok(json) => json,
                Err(e @ (Error::ProcessFailed(_) | Error::Json(_))) => {
                    warn!(object = %object_path, error = %e, "export failed, keeping object without properties");
                    serde_json::Value::Null
                }
                Err(e) => return Err(e),
            };
            exports.push(AssetExport::from_json(info, &json));
        }

        debug!(package = %package.name, exports = exports.len(), "built asset");
        Ok(Self::from_parts(package, provider.config().game_version, exports))
    }

    fn from_parts(package: PackageInfo, game_version: GameVersion, exports: Vec<AssetExport>) -> Self {
        Self {
            name: package.name,
            game_version,
            exports,
        }
    }

    /// Resolve an export reference; null and import references give `None`
    pub fn export(&self, index: PackageIndex) -> Option<&AssetExport> {
        self.exports.get(index.export_index()?)
    }

    pub fn find_export(&self, name: &str) -> Option<&AssetExport> {
        self.exports.iter().find(|e| e.object_name.as_str() == name)
    }

    /// Outer object of an export, or `None` for top-level exports
    pub fn outer_of(&self, export: &AssetExport) -> Option<&AssetExport> {
        self.export(export.outer_index)
    }

    /// Distinct object and class names, sorted
    pub fn name_map(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .exports
            .iter()
            .flat_map(|e| [e.object_name.to_string(), e.class_name.clone()])
            .collect();
        names.sort();
        names.dedup();
        names
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_package_index() {
        let null = PackageIndex::null();
        assert!(null.is_null());
        assert!(!null.is_import());
        assert!(!null.is_export());
        assert_eq!(null.import_index(), None);
        assert_eq!(null.export_index(), None);

        let import = PackageIndex(-1);
        assert!(import.is_import());
        assert!(!import.is_export());
        assert_eq!(import.import_index(), Some(0));
        assert_eq!(import.export_index(), None);

        let export = PackageIndex(1);
        assert!(export.is_export());
        assert_eq!(export.import_index(), None);
        assert_eq!(export.export_index(), Some(0));

        assert_eq!(PackageIndex(i32::MIN).import_index(), Some(i32::MAX as usize));
    }

    #[test]
    fn test_package_index_from_table_position() {
        assert_eq!(PackageIndex::from_import(0).unwrap(), PackageIndex(-1));
        assert_eq!(PackageIndex::from_export(4).unwrap(), PackageIndex(5));
        assert_eq!(PackageIndex::from_export(4).unwrap().export_index(), Some(4));
        assert!(PackageIndex::from_export(i32::MAX as usize).is_err());
    }

    #[test]
    fn test_fname_display() {
        assert_eq!(FName::new("Wall").to_string(), "Wall");
        assert_eq!(FName::with_number("Wall", 2).to_string(), "Wall_2");
        assert_eq!(FName::with_number("Wall", 2).as_str(), "Wall");
    }

    #[test]
    fn test_scalar_conversion() {
        assert_eq!(Property::from_json(&json!(true), None), Property::Bool(true));
        assert_eq!(Property::from_json(&json!(42), None), Property::Int32(42));
        assert_eq!(
            Property::from_json(&json!(9_223_372_036_854_775_807_i64), None),
            Property::Int64(i64::MAX)
        );
        assert!(matches!(
            Property::from_json(&json!(3.14159), None),
            Property::Double(f) if (f - 3.14159).abs() < f64::EPSILON
        ));
        assert_eq!(
            Property::from_json(&json!("test_string"), None),
            Property::String("test_string".into())
        );
        assert_eq!(Property::from_json(&json!(null), None), Property::Object(None));
    }

    #[test]
    fn test_name_hint() {
        let prop = Property::from_json(&json!("test_name"), Some("Name"));
        assert_eq!(prop, Property::Name(FName::new("test_name")));
        assert_eq!(prop.type_name(), "NameProperty");
        assert_eq!(prop.as_str(), Some("test_name"));
    }

    #[test]
    fn test_array_conversion() {
        let prop = Property::from_json(&json!([1, 2, 3]), None);
        assert_eq!(
            prop,
            Property::Array(vec![
                Property::Int32(1),
                Property::Int32(2),
                Property::Int32(3)
            ])
        );
    }

    #[test]
    fn test_struct_conversion() {
        let prop = Property::from_json(&json!({"$type": "Vector", "X": 1.0, "Y": 2.0, "Z": 3.0}), None);
        let Property::Struct {
            struct_type,
            properties,
        } = prop
        else {
            panic!("expected struct");
        };
        assert_eq!(struct_type.as_str(), "Vector");
        assert_eq!(properties.len(), 3);
        assert!(properties.contains_key("X"));
        assert!(properties.contains_key("Z"));

        let untyped = Property::from_json(&json!({"Count": 1}), None);
        assert!(matches!(
            untyped,
            Property::Struct { ref struct_type, .. } if struct_type.as_str() == Property::DEFAULT_STRUCT_TYPE
        ));
    }

    #[test]
    fn test_object_references() {
        let prop = Property::from_json(
            &json!({"ObjectName": "Texture2D'T_Hero'", "ObjectPath": "Game/Textures/T_Hero.0"}),
            None,
        );
        let Property::Object(Some(reference)) = prop else {
            panic!("expected object reference");
        };
        assert_eq!(reference.package(), "Game/Textures/T_Hero");
        assert_eq!(reference.export_index(), Some(0));

        let soft = Property::from_json(
            &json!({"AssetPathName": "/Game/Maps/Lobby.Lobby", "SubPathString": ""}),
            None,
        );
        assert_eq!(
            soft,
            Property::SoftObject {
                asset_path: "/Game/Maps/Lobby.Lobby".into(),
                sub_path: String::new(),
            }
        );
    }

    #[test]
    fn test_export_from_json() {
        let info = ExportInfo {
            name: "Hero_LOD1".into(),
            class_name: "SkeletalMesh".into(),
            outer_index: 1,
        };
        let export = AssetExport::from_json(&info, &json!({"bCastShadow": true, "LODCount": 4}));
        assert_eq!(export.outer_index.export_index(), Some(0));
        assert_eq!(export.property("bCastShadow").and_then(Property::as_bool), Some(true));
        assert_eq!(export.property("LODCount").and_then(Property::as_i64), Some(4));

        let bare = AssetExport::from_json(&info, &serde_json::Value::Null);
        assert!(bare.properties.is_empty());
    }

    #[test]
    fn test_resolve_outer() {
        let package = PackageInfo {
            name: "Game/Hero".into(),
            exports: Vec::new(),
        };
        let top = ExportInfo {
            name: "Hero".into(),
            class_name: "SkeletalMesh".into(),
            outer_index: 0,
        };
        let child = ExportInfo {
            name: "Hero_LOD1".into(),
            class_name: "SkeletalMesh".into(),
            outer_index: 1,
        };
        let asset = Asset::from_parts(
            package,
            GameVersion::UE5_3,
            vec![
                AssetExport::from_json(&top, &json!({})),
                AssetExport::from_json(&child, &json!({})),
            ],
        );

        let lod = asset.find_export("Hero_LOD1").unwrap();
        assert_eq!(asset.outer_of(lod).map(|e| e.object_name.as_str()), Some("Hero"));
        assert!(asset.outer_of(&asset.exports[0]).is_none());
        assert!(asset.export(PackageIndex(-1)).is_none());
        assert_eq!(asset.name_map(), vec!["Hero", "Hero_LOD1", "SkeletalMesh"]);
    }
}
