//! XML document reader.
//!
//! Only the subset of XML the writer produces is understood: a declaration,
//! comments, elements with double-quoted attributes, and character data.

use thiserror::Error;

use super::FileFormat;
use crate::native::data::{Data, GriddedField2Data, Matrix, XsecRecordData};
use crate::native::kind::{ClassKind, NodeKind};
use crate::native::species::Species;

#[derive(Debug, Error)]
#[error("{message} (at byte {offset})")]
pub(crate) struct XmlError {
    message: String,
    offset: usize,
}

fn unescape(s: &str) -> String {
    s.replace("&quot;", "\"")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&amp;", "&")
}

#[derive(Debug)]
struct Tag<'a> {
    name: &'a str,
    attrs: Vec<(&'a str, String)>,
    empty: bool,
}

impl Tag<'_> {
    fn attr(&self, key: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.as_str())
    }
}

#[derive(Debug)]
enum Token<'a> {
    Open(Tag<'a>),
    Close(&'a str),
    Text(&'a str),
}

struct Lexer<'a> {
    src: &'a str,
    pos: usize,
}

impl<'a> Lexer<'a> {
    fn error(&self, message: impl Into<String>) -> XmlError {
        XmlError {
            message: message.into(),
            offset: self.pos,
        }
    }

    fn skip_past(&mut self, end: &str) -> Result<(), XmlError> {
        match self.src[self.pos..].find(end) {
            Some(i) => {
                self.pos += i + end.len();
                Ok(())
            }
            None => Err(self.error(format!("unterminated markup, expected \"{end}\""))),
        }
    }

    fn next_token(&mut self) -> Result<Option<Token<'a>>, XmlError> {
        let src = self.src;
        loop {
            let rest = &src[self.pos..];
            if rest.is_empty() {
                return Ok(None);
            }
            if !rest.starts_with('<') {
                let len = rest.find('<').unwrap_or(rest.len());
                self.pos += len;
                return Ok(Some(Token::Text(&rest[..len])));
            }
            if rest.starts_with("<?") {
                self.skip_past("?>")?;
                continue;
            }
            if rest.starts_with("<!--") {
                self.skip_past("-->")?;
                continue;
            }
            if let Some(body) = rest.strip_prefix("</") {
                let end = body
                    .find('>')
                    .ok_or_else(|| self.error("unterminated closing tag"))?;
                self.pos += end + 3;
                return Ok(Some(Token::Close(body[..end].trim())));
            }
            return self.open_tag().map(Some);
        }
    }

    fn open_tag(&mut self) -> Result<Token<'a>, XmlError> {
        let src = self.src;
        let start = self.pos + 1;
        let mut end = None;
        let mut in_quotes = false;
        for (i, c) in src[start..].char_indices() {
            match c {
                '"' => in_quotes = !in_quotes,
                '>' if !in_quotes => {
                    end = Some(start + i);
                    break;
                }
                _ => {}
            }
        }
        let end = end.ok_or_else(|| self.error("unterminated tag"))?;
        self.pos = end + 1;

        let mut body = src[start..end].trim();
        let empty = body.ends_with('/');
        if empty {
            body = body[..body.len() - 1].trim_end();
        }

        let name_end = body.find(char::is_whitespace).unwrap_or(body.len());
        let name = &body[..name_end];
        if name.is_empty() {
            return Err(self.error("tag without a name"));
        }

        let mut attrs = Vec::new();
        let mut rest = body[name_end..].trim_start();
        while !rest.is_empty() {
            let eq = rest
                .find('=')
                .ok_or_else(|| self.error(format!("malformed attribute in <{name}>")))?;
            let key = rest[..eq].trim();
            let after = rest[eq + 1..].trim_start();
            let value = after
                .strip_prefix('"')
                .ok_or_else(|| self.error(format!("unquoted attribute {key} in <{name}>")))?;
            let close = value
                .find('"')
                .ok_or_else(|| self.error(format!("unterminated attribute {key} in <{name}>")))?;
            attrs.push((key, unescape(&value[..close])));
            rest = value[close + 1..].trim_start();
        }

        Ok(Token::Open(Tag { name, attrs, empty }))
    }
}

struct Payload {
    bytes: Vec<u8>,
    pos: usize,
}

impl Payload {
    fn take8(&mut self) -> Option<[u8; 8]> {
        let chunk = self.bytes.get(self.pos..self.pos + 8)?;
        self.pos += 8;
        chunk.try_into().ok()
    }

    /// Whole 8-byte values left.
    fn remaining(&self) -> usize {
        self.bytes.len().saturating_sub(self.pos) / 8
    }
}

/// Format declared by the root element of a document.
pub(crate) fn document_format(text: &str) -> Result<FileFormat, XmlError> {
    let mut lexer = Lexer { src: text, pos: 0 };
    loop {
        match lexer.next_token()? {
            Some(Token::Text(t)) if t.trim().is_empty() => continue,
            Some(Token::Open(tag)) if tag.name == "arts" => {
                return match tag.attr("format") {
                    None | Some("ascii") => Ok(FileFormat::Ascii),
                    Some("binary") => Ok(FileFormat::Binary),
                    Some(other) => Err(lexer.error(format!("unknown file format \"{other}\""))),
                };
            }
            _ => return Err(lexer.error("expected <arts> root element")),
        }
    }
}

/// Parse a whole document. `payload` holds the numbers of a binary document.
pub(crate) fn parse(text: &str, payload: Option<Vec<u8>>) -> Result<Data, XmlError> {
    let mut parser = Parser {
        lexer: Lexer { src: text, pos: 0 },
        payload: payload.map(|bytes| Payload { bytes, pos: 0 }),
    };
    let root = parser.open("arts")?;
    let data = parser.element()?;
    parser.finish(&root)?;
    match parser.lexer.next_token()? {
        None => Ok(data),
        Some(Token::Text(t)) if t.trim().is_empty() && parser.lexer.next_token()?.is_none() => {
            Ok(data)
        }
        Some(_) => Err(parser.lexer.error("content after </arts>")),
    }
}

struct Parser<'a> {
    lexer: Lexer<'a>,
    payload: Option<Payload>,
}

impl<'a> Parser<'a> {
    fn error(&self, message: impl Into<String>) -> XmlError {
        self.lexer.error(message)
    }

    /// Next token that is not whitespace-only text.
    fn significant(&mut self) -> Result<Token<'a>, XmlError> {
        loop {
            match self.lexer.next_token()? {
                Some(Token::Text(t)) if t.trim().is_empty() => continue,
                Some(token) => return Ok(token),
                None => return Err(self.error("unexpected end of document")),
            }
        }
    }

    fn open_any(&mut self) -> Result<Tag<'a>, XmlError> {
        match self.significant()? {
            Token::Open(tag) => Ok(tag),
            other => Err(self.error(format!("expected an element, found {other:?}"))),
        }
    }

    fn open(&mut self, name: &str) -> Result<Tag<'a>, XmlError> {
        let tag = self.open_any()?;
        if tag.name != name {
            return Err(self.error(format!("expected <{name}>, found <{}>", tag.name)));
        }
        Ok(tag)
    }

    fn finish(&mut self, tag: &Tag<'_>) -> Result<(), XmlError> {
        if tag.empty {
            return Ok(());
        }
        match self.significant()? {
            Token::Close(name) if name == tag.name => Ok(()),
            other => Err(self.error(format!("expected </{}>, found {other:?}", tag.name))),
        }
    }

    /// Character data up to the closing tag of `tag`.
    fn text(&mut self, tag: &Tag<'_>) -> Result<String, XmlError> {
        if tag.empty {
            return Ok(String::new());
        }
        let mut out = String::new();
        loop {
            match self.lexer.next_token()? {
                Some(Token::Text(t)) => out.push_str(t),
                Some(Token::Close(name)) if name == tag.name => return Ok(out),
                Some(other) => {
                    return Err(self.error(format!("unexpected {other:?} in <{}>", tag.name)));
                }
                None => return Err(self.error(format!("unterminated <{}>", tag.name))),
            }
        }
    }

    fn count_attr(&self, tag: &Tag<'_>, key: &str) -> Result<usize, XmlError> {
        let raw = tag
            .attr(key)
            .ok_or_else(|| self.error(format!("<{}> lacks attribute {key}", tag.name)))?;
        raw.parse()
            .map_err(|_| self.error(format!("bad {key}=\"{raw}\" in <{}>", tag.name)))
    }

    fn numbers(&mut self, tag: &Tag<'_>, count: usize) -> Result<Vec<f64>, XmlError> {
        if let Some(payload) = self.payload.as_mut() {
            if payload.remaining() < count {
                return Err(self.error("binary payload too short"));
            }
            let mut values = Vec::with_capacity(count);
            for _ in 0..count {
                match payload.take8() {
                    Some(bytes) => values.push(f64::from_le_bytes(bytes)),
                    None => return Err(self.error("binary payload too short")),
                }
            }
            self.finish(tag)?;
            return Ok(values);
        }

        let text = self.text(tag)?;
        let values = text
            .split_whitespace()
            .map(|word| {
                word.parse::<f64>()
                    .map_err(|_| self.error(format!("bad number \"{word}\" in <{}>", tag.name)))
            })
            .collect::<Result<Vec<_>, _>>()?;
        if values.len() != count {
            return Err(self.error(format!(
                "<{}> holds {} values, expected {count}",
                tag.name,
                values.len()
            )));
        }
        Ok(values)
    }

    fn index(&mut self, tag: &Tag<'_>) -> Result<i64, XmlError> {
        if let Some(payload) = self.payload.as_mut() {
            let bytes = payload
                .take8()
                .ok_or_else(|| self.error("binary payload too short"))?;
            self.finish(tag)?;
            return Ok(i64::from_le_bytes(bytes));
        }
        let text = self.text(tag)?;
        text.trim()
            .parse()
            .map_err(|_| self.error(format!("bad index \"{}\"", text.trim())))
    }

    fn string(&mut self, tag: &Tag<'_>) -> Result<String, XmlError> {
        let text = self.text(tag)?;
        let trimmed = text.trim();
        trimmed
            .strip_prefix('"')
            .and_then(|s| s.strip_suffix('"'))
            .map(unescape)
            .ok_or_else(|| self.error("string value must be double-quoted"))
    }

    fn vector(&mut self, tag: &Tag<'_>) -> Result<Vec<f64>, XmlError> {
        let nelem = self.count_attr(tag, "nelem")?;
        self.numbers(tag, nelem)
    }

    fn matrix(&mut self, tag: &Tag<'_>) -> Result<Matrix, XmlError> {
        let nrows = self.count_attr(tag, "nrows")?;
        let ncols = self.count_attr(tag, "ncols")?;
        let count = nrows
            .checked_mul(ncols)
            .ok_or_else(|| self.error("matrix shape overflows"))?;
        let values = self.numbers(tag, count)?;
        Matrix::new(nrows, ncols, values).map_err(|e| self.error(e.to_string()))
    }

    fn gridded_field(&mut self, tag: &Tag<'_>) -> Result<GriddedField2Data, XmlError> {
        let name = tag.attr("name").unwrap_or_default().to_string();
        let mut grid_names: [String; 2] = Default::default();
        let mut grids: [Vec<f64>; 2] = Default::default();
        for dim in 0..2 {
            let grid = self.open("Vector")?;
            grid_names[dim] = grid.attr("name").unwrap_or_default().to_string();
            grids[dim] = self.vector(&grid)?;
        }
        let data_tag = self.open("Matrix")?;
        let data = self.matrix(&data_tag)?;
        self.finish(tag)?;
        Ok(GriddedField2Data {
            name,
            grid_names,
            grids,
            data,
        })
    }

    fn xsec_record(&mut self, tag: &Tag<'_>) -> Result<XsecRecordData, XmlError> {
        let version = match tag.attr("version") {
            Some(raw) => raw
                .parse()
                .map_err(|_| self.error(format!("bad XsecRecord version \"{raw}\"")))?,
            None => crate::native::data::XSEC_RECORD_VERSION,
        };

        let species_tag = self.open("String")?;
        let species_name = self.string(&species_tag)?;
        let species = species_name
            .parse::<Species>()
            .map_err(|e| self.error(e.to_string()))?;

        let mut bounds: [Vec<f64>; 4] = Default::default();
        for slot in &mut bounds {
            let vector_tag = self.open("Vector")?;
            *slot = self.vector(&vector_tag)?;
        }
        let [
            fit_min_pressures,
            fit_max_pressures,
            fit_min_temperatures,
            fit_max_temperatures,
        ] = bounds;

        let array_tag = self.open("Array")?;
        let fit_coeffs = match self.array(&array_tag)? {
            Data::Array {
                element: ClassKind::GriddedField2,
                items,
            } => items
                .into_iter()
                .filter_map(|item| match item {
                    Data::GriddedField2(gf) => Some(*gf),
                    _ => None,
                })
                .collect(),
            _ => return Err(self.error("fit coefficients must be an array of GriddedField2")),
        };
        self.finish(tag)?;

        Ok(XsecRecordData {
            version,
            species,
            fit_min_pressures,
            fit_max_pressures,
            fit_min_temperatures,
            fit_max_temperatures,
            fit_coeffs,
        })
    }

    fn array(&mut self, tag: &Tag<'_>) -> Result<Data, XmlError> {
        let type_name = tag
            .attr("type")
            .ok_or_else(|| self.error("<Array> lacks attribute type"))?;
        let element = ClassKind::from_name(type_name)
            .ok_or_else(|| self.error(format!("unsupported array element type {type_name}")))?;
        let nelem = self.count_attr(tag, "nelem")?;

        let mut items = Vec::with_capacity(nelem.min(1 << 16));
        for _ in 0..nelem {
            let item = self.element()?;
            if item.kind() != NodeKind::Class(element) {
                return Err(self.error(format!(
                    "array of {} holds a {}",
                    element.name(),
                    item.kind()
                )));
            }
            items.push(item);
        }
        self.finish(tag)?;
        Ok(Data::Array { element, items })
    }

    fn element(&mut self) -> Result<Data, XmlError> {
        let tag = self.open_any()?;
        match tag.name {
            "Index" => self.index(&tag).map(Data::Index),
            "Numeric" => {
                let values = self.numbers(&tag, 1)?;
                Ok(Data::Numeric(values[0]))
            }
            "String" => self.string(&tag).map(Data::String),
            "Vector" => self.vector(&tag).map(Data::Vector),
            "Matrix" => self.matrix(&tag).map(Data::Matrix),
            "GriddedField2" => self.gridded_field(&tag).map(Data::from),
            "XsecRecord" => self.xsec_record(&tag).map(Data::from),
            "Array" => self.array(&tag),
            other => Err(self.error(format!("unsupported element <{other}>"))),
        }
    }
}
