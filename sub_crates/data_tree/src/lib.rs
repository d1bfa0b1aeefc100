//! A small, forgiving reader for tag-based scene documents.
//!
//! Supports elements with quoted attributes, self-closing elements, text
//! content (with the standard character entities and CDATA sections),
//! comments, and `<?...?>` / `<!...>` declarations, which are skipped.
//! Every node remembers the byte offset it starts at, so that errors
//! further up the pipeline can point back into the source text.

use std::{borrow::Cow, iter::Iterator, result::Result, slice};

#[derive(Debug, Eq, PartialEq)]
pub enum DataTree<'a> {
    Element {
        tag: &'a str,
        attributes: Vec<(&'a str, &'a str)>,
        children: Vec<DataTree<'a>>,
        byte_offset: usize,
    },

    Text {
        contents: &'a str,
        byte_offset: usize,
    },
}

impl<'a> DataTree<'a> {
    /// Parses a whole document.  The returned node is a synthetic `ROOT`
    /// element whose children are the document's top-level elements.
    pub fn from_str(source_text: &'a str) -> Result<DataTree<'a>, ParseError> {
        let (children, remaining_text) = parse_content((0, source_text))?;

        if remaining_text.1.is_empty() {
            Ok(DataTree::Element {
                tag: "ROOT",
                attributes: Vec::new(),
                children: children,
                byte_offset: 0,
            })
        } else {
            // The only thing that stops content parsing early is a closing
            // tag with nothing to close.
            Err(ParseError::UnexpectedClose(remaining_text.0))
        }
    }

    /// The element's tag, or an empty string for text nodes.
    pub fn tag(&self) -> &'a str {
        match *self {
            DataTree::Element { tag, .. } => tag,
            DataTree::Text { .. } => "",
        }
    }

    pub fn byte_offset(&self) -> usize {
        match *self {
            DataTree::Element { byte_offset, .. } | DataTree::Text { byte_offset, .. } => {
                byte_offset
            }
        }
    }

    pub fn is_element(&self) -> bool {
        match *self {
            DataTree::Element { .. } => true,
            DataTree::Text { .. } => false,
        }
    }

    /// Returns the value of the named attribute with entities decoded.
    pub fn attribute(&self, name: &str) -> Option<Cow<'a, str>> {
        match *self {
            DataTree::Element { ref attributes, .. } => attributes
                .iter()
                .find(|(n, _)| *n == name)
                .map(|&(_, v)| unescape(v)),
            DataTree::Text { .. } => None,
        }
    }

    /// Returns the text content of the node, trimmed of surrounding
    /// whitespace and with entities decoded.
    ///
    /// For elements this is the text of their direct text children; nested
    /// elements' text is not included.
    pub fn text(&self) -> Cow<'a, str> {
        match *self {
            DataTree::Text { contents, .. } => unescape(contents.trim()),
            DataTree::Element { ref children, .. } => {
                let mut texts = children.iter().filter_map(|c| match *c {
                    DataTree::Text { contents, .. } => Some(contents),
                    DataTree::Element { .. } => None,
                });
                match (texts.next(), texts.next()) {
                    (None, _) => Cow::Borrowed(""),
                    (Some(t), None) => unescape(t.trim()),
                    (Some(t1), Some(t2)) => {
                        let mut s = String::from(t1);
                        s.push_str(t2);
                        for t in texts {
                            s.push_str(t);
                        }
                        Cow::Owned(unescape(s.trim()).into_owned())
                    }
                }
            }
        }
    }

    pub fn iter_children(&'a self) -> slice::Iter<'a, DataTree<'a>> {
        if let DataTree::Element { ref children, .. } = *self {
            children.iter()
        } else {
            [].iter()
        }
    }

    /// Iterates over the child elements, skipping text nodes.
    pub fn iter_elements(&'a self) -> DataTreeElementIter<'a> {
        DataTreeElementIter {
            iter: self.iter_children(),
        }
    }

    pub fn iter_children_with_tag(&'a self, tag: &'a str) -> DataTreeFilterIter<'a> {
        DataTreeFilterIter {
            tag: tag,
            iter: self.iter_children(),
        }
    }

    pub fn first_child_with_tag(&'a self, tag: &'a str) -> Option<&'a DataTree<'a>> {
        self.iter_children_with_tag(tag).next()
    }

    pub fn count_children_with_tag(&'a self, tag: &'a str) -> usize {
        self.iter_children_with_tag(tag).count()
    }

    #[cfg(test)]
    fn element_data_or_panic(&'a self) -> (&'a str, &'a Vec<(&'a str, &'a str)>, &'a Vec<DataTree<'a>>) {
        if let DataTree::Element {
            tag,
            ref attributes,
            ref children,
            ..
        } = *self
        {
            (tag, attributes, children)
        } else {
            panic!("Expected DataTree::Element, found DataTree::Text")
        }
    }
}

/// An iterator over the children of a `DataTree` node that skips text nodes.
pub struct DataTreeElementIter<'a> {
    iter: slice::Iter<'a, DataTree<'a>>,
}

impl<'a> Iterator for DataTreeElementIter<'a> {
    type Item = &'a DataTree<'a>;

    fn next(&mut self) -> Option<&'a DataTree<'a>> {
        loop {
            match self.iter.next() {
                Some(dt) if dt.is_element() => return Some(dt),
                Some(_) => continue,
                None => return None,
            }
        }
    }
}

/// An iterator over the children of a `DataTree` node that filters out the
/// children not matching a specified tag.
pub struct DataTreeFilterIter<'a> {
    tag: &'a str,
    iter: slice::Iter<'a, DataTree<'a>>,
}

impl<'a> Iterator for DataTreeFilterIter<'a> {
    type Item = &'a DataTree<'a>;

    fn next(&mut self) -> Option<&'a DataTree<'a>> {
        loop {
            if let Some(dt) = self.iter.next() {
                if dt.is_element() && dt.tag() == self.tag {
                    return Some(dt);
                } else {
                    continue;
                }
            } else {
                return None;
            }
        }
    }
}

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum ParseError {
    MissingTagName(usize),
    MissingCloseTag(usize),
    MismatchedCloseTag(usize),
    UnexpectedClose(usize),
    MalformedAttribute(usize),
    Unterminated(usize, &'static str),
}

impl ParseError {
    pub fn byte_offset(&self) -> usize {
        match *self {
            ParseError::MissingTagName(o)
            | ParseError::MissingCloseTag(o)
            | ParseError::MismatchedCloseTag(o)
            | ParseError::UnexpectedClose(o)
            | ParseError::MalformedAttribute(o)
            | ParseError::Unterminated(o, _) => o,
        }
    }
}

impl std::error::Error for ParseError {}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> Result<(), std::fmt::Error> {
        match *self {
            ParseError::MissingTagName(o) => write!(f, "expected a tag name at byte {}", o),
            ParseError::MissingCloseTag(o) => {
                write!(f, "element opened at byte {} is never closed", o)
            }
            ParseError::MismatchedCloseTag(o) => {
                write!(f, "closing tag at byte {} doesn't match its element", o)
            }
            ParseError::UnexpectedClose(o) => {
                write!(f, "closing tag at byte {} has no matching open tag", o)
            }
            ParseError::MalformedAttribute(o) => write!(f, "malformed attribute at byte {}", o),
            ParseError::Unterminated(o, what) => {
                write!(f, "unterminated {} starting at byte {}", what, o)
            }
        }
    }
}

/// Decodes the standard character entities.  Unknown entities are left
/// untouched.
pub fn unescape(text: &str) -> Cow<str> {
    if !text.contains('&') {
        return Cow::Borrowed(text);
    }

    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(i) = rest.find('&') {
        out.push_str(&rest[..i]);
        rest = &rest[i..];

        let decoded = rest.find(';').and_then(|end| {
            let c = match &rest[1..end] {
                "lt" => Some('<'),
                "gt" => Some('>'),
                "amp" => Some('&'),
                "quot" => Some('"'),
                "apos" => Some('\''),
                e if e.starts_with("#x") || e.starts_with("#X") => {
                    u32::from_str_radix(&e[2..], 16).ok().and_then(std::char::from_u32)
                }
                e if e.starts_with('#') => e[1..].parse::<u32>().ok().and_then(std::char::from_u32),
                _ => None,
            };
            c.map(|c| (c, end))
        });

        if let Some((c, end)) = decoded {
            out.push(c);
            rest = &rest[(end + 1)..];
        } else {
            out.push('&');
            rest = &rest[1..];
        }
    }
    out.push_str(rest);

    Cow::Owned(out)
}

// ================================================================

type Source<'a> = (usize, &'a str);

fn advance(text: Source, n: usize) -> Source {
    (text.0 + n, &text.1[n..])
}

/// Parses a sequence of sibling nodes, stopping at a closing tag or at the
/// end of the text.
fn parse_content(source_text: Source) -> Result<(Vec<DataTree>, Source), ParseError> {
    let mut children = Vec::new();
    let mut text = source_text;

    loop {
        if text.1.is_empty() || text.1.starts_with("</") {
            return Ok((children, text));
        } else if text.1.starts_with("<!--") {
            text = skip_past(text, "-->", "comment")?;
        } else if text.1.starts_with("<![CDATA[") {
            let start = advance(text, 9);
            let end = start
                .1
                .find("]]>")
                .ok_or(ParseError::Unterminated(text.0, "CDATA section"))?;
            children.push(DataTree::Text {
                contents: &start.1[..end],
                byte_offset: start.0,
            });
            text = advance(start, end + 3);
        } else if text.1.starts_with("<?") {
            text = skip_past(text, "?>", "declaration")?;
        } else if text.1.starts_with("<!") {
            text = skip_past(text, ">", "declaration")?;
        } else if text.1.starts_with('<') {
            let (node, remaining) = parse_element(text)?;
            children.push(node);
            text = remaining;
        } else {
            let end = text.1.find('<').unwrap_or_else(|| text.1.len());
            let contents = &text.1[..end];
            if !contents.trim().is_empty() {
                children.push(DataTree::Text {
                    contents: contents,
                    byte_offset: text.0,
                });
            }
            text = advance(text, end);
        }
    }
}

/// Parses one element, starting at its opening `<`.
fn parse_element(source_text: Source) -> Result<(DataTree, Source), ParseError> {
    let start = source_text.0;
    let (tag, mut text) = parse_name(advance(source_text, 1));
    if tag.is_empty() {
        return Err(ParseError::MissingTagName(text.0));
    }

    // Attributes
    let mut attributes = Vec::new();
    loop {
        text = skip_ws(text);
        if text.1.starts_with("/>") {
            return Ok((
                DataTree::Element {
                    tag: tag,
                    attributes: attributes,
                    children: Vec::new(),
                    byte_offset: start,
                },
                advance(text, 2),
            ));
        } else if text.1.starts_with('>') {
            text = advance(text, 1);
            break;
        } else if text.1.is_empty() {
            return Err(ParseError::Unterminated(start, "tag"));
        }

        let (attribute, remaining) = parse_attribute(text)?;
        attributes.push(attribute);
        text = remaining;
    }

    // Children
    let (children, text) = parse_content(text)?;
    if text.1.is_empty() {
        return Err(ParseError::MissingCloseTag(start));
    }

    // Closing tag.  `parse_content` only stops at "</" or the end.
    let close_offset = text.0;
    let (close_tag, text) = parse_name(advance(text, 2));
    let text = skip_ws(text);
    if close_tag != tag || !text.1.starts_with('>') {
        return Err(ParseError::MismatchedCloseTag(close_offset));
    }

    Ok((
        DataTree::Element {
            tag: tag,
            attributes: attributes,
            children: children,
            byte_offset: start,
        },
        advance(text, 1),
    ))
}

fn parse_attribute(source_text: Source) -> Result<((&str, &str), Source), ParseError> {
    let (name, text) = parse_name(source_text);
    if name.is_empty() {
        return Err(ParseError::MalformedAttribute(source_text.0));
    }

    let text = skip_ws(text);
    if !text.1.starts_with('=') {
        return Err(ParseError::MalformedAttribute(text.0));
    }
    let text = skip_ws(advance(text, 1));

    let quote = match text.1.chars().next() {
        Some(c) if c == '"' || c == '\'' => c,
        _ => return Err(ParseError::MalformedAttribute(text.0)),
    };
    let value_text = advance(text, 1);
    let end = value_text
        .1
        .find(quote)
        .ok_or(ParseError::Unterminated(text.0, "attribute value"))?;

    Ok(((name, &value_text.1[..end]), advance(value_text, end + 1)))
}

fn parse_name(text: Source) -> (&str, Source) {
    let end = text
        .1
        .char_indices()
        .find(|&(_, c)| !is_name_char(c))
        .map(|(i, _)| i)
        .unwrap_or_else(|| text.1.len());

    (&text.1[..end], advance(text, end))
}

/// Skips past the next occurrence of `terminator`.
fn skip_past<'a>(
    text: Source<'a>,
    terminator: &str,
    what: &'static str,
) -> Result<Source<'a>, ParseError> {
    match text.1.find(terminator) {
        Some(i) => Ok(advance(text, i + terminator.len())),
        None => Err(ParseError::Unterminated(text.0, what)),
    }
}

fn is_ws(c: char) -> bool {
    match c {
        '\n' | '\r' | '\t' | ' ' => true,
        _ => false,
    }
}

fn is_name_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '-' || c == '.' || c == ':'
}

fn skip_ws(text: Source) -> Source {
    let end = text
        .1
        .char_indices()
        .find(|&(_, c)| !is_ws(c))
        .map(|(i, _)| i)
        .unwrap_or_else(|| text.1.len());

    advance(text, end)
}

// ================================================================
