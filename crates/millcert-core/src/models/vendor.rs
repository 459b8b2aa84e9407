//! Vendor configuration: declarative per-vendor pattern sets.
//!
//! A vendor config is a JSON document mapping field names to patterns.
//! Field names are normalized onto the three canonical fields
//! (`PLATE_NO`, `HEAT_NO`, `TEST_CERT_NO`); `PART_NO`/`PRODUCT_NO` and
//! `CERTIFICATE_NO`/`REPORT_NO` are accepted aliases. Declaration order
//! matters: output filenames join field values in config order.

use std::fmt;
use std::path::Path;

use regex::{Regex, RegexBuilder};
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::ConfigError;

/// The three canonical fields every certificate entry carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CanonicalField {
    /// Plate / part / product number.
    Plate,
    /// Heat / batch number.
    Heat,
    /// Test certificate / report number.
    Cert,
}

impl CanonicalField {
    /// Map a config field name onto its canonical field, if any.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "PLATE_NO" | "PART_NO" | "PRODUCT_NO" => Some(Self::Plate),
            "HEAT_NO" => Some(Self::Heat),
            "TEST_CERT_NO" | "CERTIFICATE_NO" | "REPORT_NO" => Some(Self::Cert),
            _ => None,
        }
    }

    /// Canonical field name as it appears in the log.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Plate => "PLATE_NO",
            Self::Heat => "HEAT_NO",
            Self::Cert => "TEST_CERT_NO",
        }
    }
}

/// How a field pattern is applied to page text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchType {
    /// Search the whole page text.
    #[default]
    Global,
    /// Search each line independently (fragmented OCR output).
    LineByLine,
}

/// Pattern descriptor for one config field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldSpec {
    /// Regex pattern; applied case-insensitively.
    pub pattern: String,
    /// Match mode.
    #[serde(default)]
    pub match_type: MatchType,
    /// Share the first matched value across all entries on the page.
    #[serde(default)]
    pub share_value: bool,
}

impl FieldSpec {
    /// A plain global, non-shared pattern.
    pub fn pattern(pattern: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
            match_type: MatchType::Global,
            share_value: false,
        }
    }
}

// Accepts either a bare pattern string or the full descriptor object.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawFieldSpec {
    Pattern(String),
    Full {
        pattern: String,
        #[serde(default)]
        match_type: MatchType,
        #[serde(default)]
        share_value: bool,
    },
}

impl From<RawFieldSpec> for FieldSpec {
    fn from(raw: RawFieldSpec) -> Self {
        match raw {
            RawFieldSpec::Pattern(pattern) => FieldSpec::pattern(pattern),
            RawFieldSpec::Full {
                pattern,
                match_type,
                share_value,
            } => FieldSpec {
                pattern,
                match_type,
                share_value,
            },
        }
    }
}

/// One weighted pattern for vendor auto-detection.
///
/// A negative weight expresses a counter-indication (`not posco`,
/// `ex-posco`) that lowers the score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectSpec {
    /// Regex pattern; applied case-insensitively.
    pub pattern: String,
    /// Score contribution per match.
    #[serde(default = "default_detect_weight")]
    pub weight: f32,
}

fn default_detect_weight() -> f32 {
    0.7
}

/// A named field in declaration order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamedField {
    /// Field name as declared in the config.
    pub name: String,
    /// Pattern descriptor.
    pub spec: FieldSpec,
}

/// Ordered field mapping. JSON object order is preserved.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VendorFields(pub Vec<NamedField>);

impl VendorFields {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &NamedField> {
        self.0.iter()
    }
}

impl<'de> Deserialize<'de> for VendorFields {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct FieldsVisitor;

        impl<'de> Visitor<'de> for FieldsVisitor {
            type Value = VendorFields;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of field name to pattern")
            }

            fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut fields = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some((name, raw)) = map.next_entry::<String, RawFieldSpec>()? {
                    fields.push(NamedField {
                        name,
                        spec: raw.into(),
                    });
                }
                Ok(VendorFields(fields))
            }
        }

        deserializer.deserialize_map(FieldsVisitor)
    }
}

impl Serialize for VendorFields {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for field in &self.0 {
            map.serialize_entry(&field.name, &field.spec)?;
        }
        map.end()
    }
}

/// Declarative per-vendor extraction configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VendorConfig {
    /// Stable vendor identifier (part of the content fingerprint).
    #[serde(default)]
    pub vendor_id: String,

    /// Human-readable vendor name (drives the output directory).
    #[serde(default)]
    pub vendor_name: String,

    /// Vendor documents carry reliable table layouts; try table-cell
    /// extraction before text proximity matching.
    #[serde(default)]
    pub table_extraction: bool,

    /// Emit a single entry from shared values even when no plate number
    /// matched (line-scan mode only).
    #[serde(default)]
    pub multi_match: bool,

    /// Field name -> pattern, in declaration order.
    #[serde(default)]
    pub fields: VendorFields,

    /// Weighted patterns identifying this vendor's documents. When
    /// empty, the vendor name itself is the detection pattern.
    #[serde(default)]
    pub detect: Vec<DetectSpec>,
}

impl VendorConfig {
    /// Load a vendor config from a JSON file. The result is not yet
    /// validated; call [`VendorConfig::compile`] before pipeline entry.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Read(format!("{}: {}", path.display(), e)))?;
        serde_json::from_str(&content)
            .map_err(|e| ConfigError::Parse(format!("{}: {}", path.display(), e)))
    }

    /// Validate the config and compile all patterns.
    ///
    /// Fails fast with a [`ConfigError`] when `vendor_id`, `vendor_name`,
    /// or the `fields` mapping is missing, when any canonical field has no
    /// pattern, or when a pattern does not compile.
    pub fn compile(&self) -> Result<CompiledVendor, ConfigError> {
        if self.vendor_id.trim().is_empty() {
            return Err(ConfigError::MissingKey("vendor_id"));
        }
        if self.vendor_name.trim().is_empty() {
            return Err(ConfigError::MissingKey("vendor_name"));
        }
        if self.fields.is_empty() {
            return Err(ConfigError::MissingKey("fields"));
        }

        let mut fields = Vec::with_capacity(self.fields.0.len());
        for field in self.fields.iter() {
            let regex = compile_pattern(&field.name, &field.spec.pattern)?;
            fields.push(CompiledField {
                name: field.name.clone(),
                canonical: CanonicalField::from_name(&field.name),
                pattern: field.spec.pattern.clone(),
                regex,
                match_type: field.spec.match_type,
                share_value: field.spec.share_value,
            });
        }

        for canonical in [CanonicalField::Plate, CanonicalField::Heat, CanonicalField::Cert] {
            if !fields.iter().any(|f| f.canonical == Some(canonical)) {
                return Err(ConfigError::MissingFieldPattern(canonical.name()));
            }
        }

        // Combined plate-then-heat pattern for certificate-scoped blocks.
        let plate = fields
            .iter()
            .find(|f| f.canonical == Some(CanonicalField::Plate))
            .expect("validated above");
        let heat = fields
            .iter()
            .find(|f| f.canonical == Some(CanonicalField::Heat))
            .expect("validated above");
        let pair = compile_pattern(
            "PLATE_NO..HEAT_NO",
            &format!(r"(?P<plate>{}).*?(?P<heat>{})", plate.pattern, heat.pattern),
        )?;

        let mut detect = Vec::with_capacity(self.detect.len().max(1));
        for spec in &self.detect {
            detect.push(CompiledDetect {
                regex: compile_pattern("detect", &spec.pattern)?,
                weight: spec.weight,
            });
        }
        if detect.is_empty() {
            detect.push(CompiledDetect {
                regex: compile_pattern("detect", &regex::escape(&self.vendor_name))?,
                weight: default_detect_weight(),
            });
        }

        Ok(CompiledVendor {
            vendor_id: self.vendor_id.clone(),
            vendor_name: self.vendor_name.clone(),
            table_extraction: self.table_extraction,
            multi_match: self.multi_match,
            fields,
            pair,
            detect,
        })
    }
}

fn compile_pattern(field: &str, pattern: &str) -> Result<Regex, ConfigError> {
    RegexBuilder::new(pattern)
        .case_insensitive(true)
        .build()
        .map_err(|e| ConfigError::InvalidPattern {
            field: field.to_string(),
            message: e.to_string(),
        })
}

/// One compiled config field.
#[derive(Debug, Clone)]
pub struct CompiledField {
    /// Declared field name.
    pub name: String,
    /// Canonical field this name normalizes to, if any.
    pub canonical: Option<CanonicalField>,
    /// Raw pattern source.
    pub pattern: String,
    /// Compiled case-insensitive regex.
    pub regex: Regex,
    /// Match mode.
    pub match_type: MatchType,
    /// Share the first matched value across entries.
    pub share_value: bool,
}

/// One compiled detection pattern.
#[derive(Debug, Clone)]
pub struct CompiledDetect {
    /// Compiled case-insensitive regex.
    pub regex: Regex,
    /// Score contribution per match; negative for counter-indications.
    pub weight: f32,
}

/// Validated vendor config with compiled patterns, ready for the pipeline.
#[derive(Debug, Clone)]
pub struct CompiledVendor {
    pub vendor_id: String,
    pub vendor_name: String,
    pub table_extraction: bool,
    pub multi_match: bool,
    /// Compiled fields in declaration order.
    pub fields: Vec<CompiledField>,
    /// Combined non-greedy `plate ... heat` regex with named groups.
    pub pair: Regex,
    /// Detection patterns; never empty after `compile()`.
    pub detect: Vec<CompiledDetect>,
}

impl CompiledVendor {
    /// First field normalizing to the given canonical field.
    ///
    /// Guaranteed to exist; [`VendorConfig::compile`] rejects configs
    /// missing any canonical field.
    pub fn field(&self, canonical: CanonicalField) -> &CompiledField {
        self.fields
            .iter()
            .find(|f| f.canonical == Some(canonical))
            .expect("compile() guarantees canonical coverage")
    }

    /// Output directory name: vendor name with spaces as underscores.
    pub fn dir_name(&self) -> String {
        self.vendor_name.replace(' ', "_")
    }
}
