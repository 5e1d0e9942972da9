//! Dynamic route segment conversion
//!
//! Bracketed segments (`[id]`, `[...slug]`, `[[...slug]]`) become
//! `$`-prefixed parameters. Everything else passes through untouched.

/// Shape of a single path segment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentKind<'a> {
    /// `[name]`
    Dynamic(&'a str),
    /// `[...name]`
    CatchAll(&'a str),
    /// `[[...name]]`
    OptionalCatchAll(&'a str),
    /// Anything else
    Static(&'a str),
}

impl<'a> SegmentKind<'a> {
    /// Classify one segment (no separators inside)
    pub fn parse(segment: &'a str) -> SegmentKind<'a> {
        if let Some(inner) = segment
            .strip_prefix("[[...")
            .and_then(|rest| rest.strip_suffix("]]"))
        {
            if is_param_name(inner) {
                return SegmentKind::OptionalCatchAll(inner);
            }
        }

        if let Some(inner) = segment
            .strip_prefix('[')
            .and_then(|rest| rest.strip_suffix(']'))
        {
            if let Some(name) = inner.strip_prefix("...") {
                if is_param_name(name) {
                    return SegmentKind::CatchAll(name);
                }
            } else if is_param_name(inner) {
                return SegmentKind::Dynamic(inner);
            }
        }

        SegmentKind::Static(segment)
    }

    pub fn is_dynamic(self) -> bool {
        !matches!(self, SegmentKind::Static(_))
    }

    pub fn is_catch_all(self) -> bool {
        matches!(
            self,
            SegmentKind::CatchAll(_) | SegmentKind::OptionalCatchAll(_)
        )
    }

    /// Render the segment in `$param` form
    pub fn render(self) -> String {
        match self {
            SegmentKind::Dynamic(name)
            | SegmentKind::CatchAll(name)
            | SegmentKind::OptionalCatchAll(name) => format!("${}", name),
            SegmentKind::Static(segment) => segment.to_string(),
        }
    }
}

fn is_param_name(name: &str) -> bool {
    !name.is_empty() && !name.contains(['[', ']', '/', '\\'])
}

/// Convert a single segment
pub fn convert_dynamic_segment(segment: &str) -> String {
    SegmentKind::parse(segment).render()
}

/// Convert every `/`- or `\`-delimited segment of `path`
///
/// Segments are rejoined with the separator found in the input. When the
/// input has no separator, or has both, forward slash is used.
pub fn convert_dynamic_path(path: &str) -> String {
    let separator = if path.contains('\\') && !path.contains('/') {
        '\\'
    } else {
        '/'
    };

    path.split(['/', '\\'])
        .map(convert_dynamic_segment)
        .collect::<Vec<_>>()
        .join(&separator.to_string())
}

/// Split a relative directory into its non-empty segments
pub fn segments(path: &str) -> impl Iterator<Item = &str> {
    path.split(['/', '\\'])
        .filter(|segment| !segment.is_empty() && *segment != ".")
}
