//! Restricted template language for naming and seeding new migrations.
//!
//! Templates use a small subset of Python's `str.format` syntax:
//!
//! - `{name}` substitutes a field
//! - `{{` and `}}` render literal braces
//! - `{name:spec}` pads the value, where `spec` is `[[fill]align][0][width]`
//!   and `align` is one of `<`, `>`, `^`
//! - `{name!s}` is accepted and means the same as `{name}`
//! - replacement fields nested inside a spec (`{desc:>{next_version}}`) are
//!   not supported
//!
//! Only the fields in [`MIGRATION_TEMPLATE_FIELDS`] may ever be referenced.
//! [`validate_template_fields`] enforces that when a config is loaded;
//! [`format_migration_string`] renders a template at runtime.

use std::collections::BTreeMap;

use crate::error::{Error, Result};

/// The only field names a migration template may reference.
pub const MIGRATION_TEMPLATE_FIELDS: [&str; 5] =
    ["date", "desc", "full_desc", "keyspace", "next_version"];

/// A parsed template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template<'a> {
    segments: Vec<Segment<'a>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment<'a> {
    Literal(&'a str),
    Field(FieldRef<'a>),
}

/// A single `{...}` replacement field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldRef<'a> {
    /// Leading field name, e.g. `desc` in `{desc.upper:>10}`.
    pub name: &'a str,
    /// Attribute or index path following the name, e.g. `.upper`.
    pub path: &'a str,
    /// Conversion character after `!`, if any.
    pub conversion: Option<char>,
    /// Format spec after `:`, possibly empty.
    pub spec: &'a str,
    /// Byte offset of the opening brace in the template.
    pub position: usize,
}

impl<'a> Template<'a> {
    /// Parses a template string.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidValue`] for unbalanced braces or a malformed
    /// conversion.
    ///
    /// # Examples
    ///
    /// ```
    /// use cqlmig::template::Template;
    ///
    /// let template = Template::parse("v{next_version}_{desc}").unwrap();
    /// let names: Vec<_> = template.fields().map(|f| f.name).collect();
    /// assert_eq!(names, ["next_version", "desc"]);
    ///
    /// assert!(Template::parse("v{next_version").is_err());
    /// ```
    pub fn parse(source: &'a str) -> Result<Self> {
        let bytes = source.as_bytes();
        let mut segments = Vec::new();
        let mut literal_start = 0;
        let mut i = 0;

        while i < bytes.len() {
            match bytes[i] {
                b'{' => {
                    if literal_start < i {
                        segments.push(Segment::Literal(&source[literal_start..i]));
                    }
                    if bytes.get(i + 1) == Some(&b'{') {
                        segments.push(Segment::Literal(&source[i..=i]));
                        i += 2;
                    } else {
                        let close = Self::find_field_end(source, i)?;
                        segments.push(Segment::Field(FieldRef::parse(
                            &source[i + 1..close],
                            i,
                        )?));
                        i = close + 1;
                    }
                    literal_start = i;
                }
                b'}' => {
                    if bytes.get(i + 1) != Some(&b'}') {
                        return Err(Error::InvalidValue(format!(
                            "Single '}}' encountered in format string at position {i}"
                        )));
                    }
                    if literal_start < i {
                        segments.push(Segment::Literal(&source[literal_start..i]));
                    }
                    segments.push(Segment::Literal(&source[i..=i]));
                    i += 2;
                    literal_start = i;
                }
                _ => i += 1,
            }
        }

        if literal_start < source.len() {
            segments.push(Segment::Literal(&source[literal_start..]));
        }

        Ok(Self { segments })
    }

    fn find_field_end(source: &str, open: usize) -> Result<usize> {
        for (offset, byte) in source.as_bytes()[open + 1..].iter().enumerate() {
            match byte {
                b'}' => return Ok(open + 1 + offset),
                b'{' => {
                    return Err(Error::InvalidValue(format!(
                        "unexpected '{{' in field name at position {open}"
                    )))
                }
                _ => {}
            }
        }
        Err(Error::InvalidValue(format!(
            "Single '{{' encountered in format string at position {open}"
        )))
    }

    /// Iterates over the replacement fields in order of appearance.
    pub fn fields(&self) -> impl Iterator<Item = &FieldRef<'a>> {
        self.segments.iter().filter_map(|segment| match segment {
            Segment::Field(field) => Some(field),
            Segment::Literal(_) => None,
        })
    }

    /// Renders the template with the given field values.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidValue`] if a field has no value, uses
    /// attribute/index access or an unsupported conversion, or has a format
    /// spec outside the supported subset.
    pub fn render(&self, values: &BTreeMap<String, String>) -> Result<String> {
        let mut out = String::new();
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Field(field) => out.push_str(&field.render(values)?),
            }
        }
        Ok(out)
    }
}

impl<'a> FieldRef<'a> {
    fn parse(inner: &'a str, position: usize) -> Result<Self> {
        let reference_end = inner.find(['!', ':']).unwrap_or(inner.len());
        let reference = &inner[..reference_end];
        let rest = &inner[reference_end..];

        let (conversion, spec) = if let Some(after_bang) = rest.strip_prefix('!') {
            let mut chars = after_bang.chars();
            let conversion = chars.next().ok_or_else(|| {
                Error::InvalidValue(format!(
                    "end of string while looking for conversion specifier at position {position}"
                ))
            })?;
            let after = chars.as_str();
            let spec = if after.is_empty() {
                ""
            } else {
                after.strip_prefix(':').ok_or_else(|| {
                    Error::InvalidValue(format!(
                        "expected ':' after conversion specifier at position {position}"
                    ))
                })?
            };
            (Some(conversion), spec)
        } else {
            (None, rest.strip_prefix(':').unwrap_or(""))
        };

        let name_end = reference.find(['.', '[']).unwrap_or(reference.len());
        Ok(Self {
            name: &reference[..name_end],
            path: &reference[name_end..],
            conversion,
            spec,
            position,
        })
    }

    fn render(&self, values: &BTreeMap<String, String>) -> Result<String> {
        let value = values
            .get(self.name)
            .ok_or_else(|| Error::InvalidValue(format!("Unknown format field: {}", self.name)))?;

        if !self.path.is_empty() {
            return Err(Error::InvalidValue(format!(
                "attribute or index access is not supported: {}{}",
                self.name, self.path
            )));
        }

        match self.conversion {
            None | Some('s') => {}
            Some(other) => {
                return Err(Error::InvalidValue(format!(
                    "unsupported conversion '!{other}' for field {}",
                    self.name
                )))
            }
        }

        pad(value, self.spec)
    }
}

/// Applies a `[[fill]align][0][width]` spec to a value.
fn pad(value: &str, spec: &str) -> Result<String> {
    if spec.is_empty() {
        return Ok(value.to_string());
    }

    let is_align = |c: char| matches!(c, '<' | '>' | '^');
    let chars: Vec<char> = spec.chars().collect();
    let (mut fill, mut align, mut rest) = match chars.as_slice() {
        [fill, align, ..] if is_align(*align) => (*fill, Some(*align), &chars[2..]),
        [align, ..] if is_align(*align) => (' ', Some(*align), &chars[1..]),
        _ => (' ', None, &chars[..]),
    };

    if align.is_none() && rest.first() == Some(&'0') {
        fill = '0';
        align = Some('>');
        rest = &rest[1..];
    }

    let width_str: String = rest.iter().collect();
    let width = if width_str.is_empty() {
        0
    } else {
        width_str
            .parse::<usize>()
            .map_err(|_| Error::InvalidValue(format!("unsupported format spec: {spec}")))?
    };

    let missing = width.saturating_sub(value.chars().count());
    let repeat = |n: usize| fill.to_string().repeat(n);
    Ok(match align.unwrap_or('<') {
        '>' => format!("{}{value}", repeat(missing)),
        '^' => {
            let left = missing / 2;
            format!("{}{value}{}", repeat(left), repeat(missing - left))
        }
        _ => format!("{value}{}", repeat(missing)),
    })
}

/// Checks that a template only references the fixed migration fields.
///
/// Only the leading name of each reference is checked, so `{date.year}`
/// passes here even though it cannot be rendered.
///
/// # Errors
///
/// Returns [`Error::InvalidValue`] for an unknown field or a malformed
/// template.
///
/// # Examples
///
/// ```
/// use cqlmig::template::validate_template_fields;
///
/// assert!(validate_template_fields("v{next_version}_{desc}").is_ok());
/// assert!(validate_template_fields("{unknown_field}").is_err());
/// ```
pub fn validate_template_fields(template: &str) -> Result<()> {
    for field in Template::parse(template)?.fields() {
        if !MIGRATION_TEMPLATE_FIELDS.contains(&field.name) {
            return Err(Error::InvalidValue(format!(
                "Unknown format field: {}",
                field.name
            )));
        }
    }
    Ok(())
}

/// Renders a migration template.
///
/// `fields` must contain exactly the keys in [`MIGRATION_TEMPLATE_FIELDS`],
/// no more and no fewer; this is checked before anything is rendered.
///
/// # Errors
///
/// Returns [`Error::InvalidValue`] if the key set is wrong or the template
/// cannot be rendered.
///
/// # Examples
///
/// ```
/// use cqlmig::template::{format_migration_string, MigrationFields};
///
/// let fields = MigrationFields {
///     keyspace: "ks1".into(),
///     next_version: 3,
///     ..Default::default()
/// };
/// let rendered = format_migration_string("{keyspace}-{next_version}", &fields.into()).unwrap();
/// assert_eq!(rendered, "ks1-3");
/// ```
pub fn format_migration_string(template: &str, fields: &BTreeMap<String, String>) -> Result<String> {
    let exact = fields.len() == MIGRATION_TEMPLATE_FIELDS.len()
        && MIGRATION_TEMPLATE_FIELDS
            .iter()
            .all(|name| fields.contains_key(*name));
    if !exact {
        return Err(Error::InvalidValue(
            "Invalid keys for migration name format data".to_string(),
        ));
    }

    Template::parse(template)?.render(fields)
}

/// Typed values for every migration template field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MigrationFields {
    /// Short description, safe for file names.
    pub desc: String,
    /// Description as the user wrote it.
    pub full_desc: String,
    /// Version the new migration will get.
    pub next_version: usize,
    /// Creation timestamp.
    pub date: String,
    /// Keyspace being migrated.
    pub keyspace: String,
}

impl From<MigrationFields> for BTreeMap<String, String> {
    fn from(fields: MigrationFields) -> Self {
        BTreeMap::from([
            ("desc".to_string(), fields.desc),
            ("full_desc".to_string(), fields.full_desc),
            ("next_version".to_string(), fields.next_version.to_string()),
            ("date".to_string(), fields.date),
            ("keyspace".to_string(), fields.keyspace),
        ])
    }
}
