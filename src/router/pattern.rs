use crate::error::Error;
use regex::Regex;

/// A compiled path template: the expanded regular expression plus the
/// parameter names aligned positionally with its capture groups.
#[derive(Debug)]
pub(crate) struct Pattern {
  template: String,
  regex: Regex,
  params: Vec<String>,
}

impl Pattern {
  /// Compiles a `/`-delimited template.
  ///
  /// A segment starting with `:` is a named parameter capturing `[^/]+` by
  /// default; a parenthesized suffix immediately after the name overrides
  /// the capture sub-pattern, e.g. `/user/:id([0-9]+)`. All other
  /// characters pass through as literal regular-expression fragments.
  pub(crate) fn compile(template: &str) -> Result<Pattern, Error> {
    let mut params = Vec::new();
    let parts: Vec<String> = template
      .split('/')
      .map(|part| match part.strip_prefix(':') {
        Some(rest) => match rest.find('(') {
          Some(index) => {
            params.push(rest[..index].to_owned());
            rest[index..].to_owned()
          }
          None => {
            params.push(rest.to_owned());
            String::from("([^/]+)")
          }
        },
        None => part.to_owned(),
      })
      .collect();

    let regex = Regex::new(&parts.join("/")).map_err(|source| Error::Pattern {
      pattern: template.to_owned(),
      source,
    })?;

    Ok(Pattern {
      template: template.to_owned(),
      regex,
      params,
    })
  }

  /// Tests `path` and, on a full-span match, returns the captured values
  /// paired with their parameter names in template order.
  ///
  /// The match must consume the entire path. An override sub-pattern may
  /// carry its own anchors or slashes, so the span is verified by
  /// comparing the matched length against the path length instead of
  /// relying on `^`/`$`.
  pub(crate) fn matches<'p>(&self, path: &'p str) -> Option<Vec<(&str, &'p str)>> {
    let caps = self.regex.captures(path)?;
    let whole = caps.get(0)?;
    if whole.as_str().len() != path.len() {
      return None;
    }

    let mut bound = Vec::with_capacity(self.params.len());
    for (i, name) in self.params.iter().enumerate() {
      // groups beyond the recorded names (nested groups inside an
      // override sub-pattern) are ignored
      if let Some(group) = caps.get(i + 1) {
        bound.push((name.as_str(), group.as_str()));
      }
    }
    Some(bound)
  }

  pub(crate) fn template(&self) -> &str {
    &self.template
  }

  pub(crate) fn param_names(&self) -> &[String] {
    &self.params
  }
}
