//! Header block parsing.
//!
//! Every function takes the remaining input and returns the number of bytes it
//! consumed; the caller advances its cursor by that count.

use crate::error::ParseError;
use crate::http_header::HeaderList;
use crate::options::ConsumeOptions;
use crate::span::Span;
use crate::text::{self, CR, CRLF};
use log::trace;

/// Consume one physical line of a header value, terminator included.
///
/// Leading and trailing linear white space is not part of the returned value.
/// Without a terminator the line is `Incomplete`, unless
/// `accept_missing_terminator` is set, in which case everything up to the end
/// of `text` is the line.
pub fn consume_value_line(
    text: &[u8],
    options: ConsumeOptions,
) -> Result<(Span<'_>, usize), ParseError> {
    let start = text
        .iter()
        .position(|&c| !text::is_lws(c))
        .unwrap_or(text.len());
    let end = text[start..]
        .windows(CRLF.len())
        .position(|pair| pair == CRLF)
        .map(|offset| start + offset);

    let (line_end, consumed) = match end {
        Some(end) => (end, end + CRLF.len()),
        None if !options.accept_missing_terminator || text.last() == Some(&CR) => {
            return Err(ParseError::Incomplete);
        }
        None => (text.len(), text.len()),
    };

    let line = &text[start..line_end];
    let length = line
        .iter()
        .rposition(|&c| !text::is_lws(c))
        .map_or(0, |last| last + 1);
    Ok((Span::new(&line[..length]), consumed))
}

/// Consume a field line or a continuation line into `list`.
///
/// A field line (`name ":" value`) opens a new field, a line starting with
/// linear white space adds a chunk to the value of the last field.
pub fn consume_field_line<'a>(
    list: &mut HeaderList<'a>,
    text: &'a [u8],
    options: ConsumeOptions,
) -> Result<usize, ParseError> {
    let Some(&first) = text.first() else {
        return Err(ParseError::InvalidArgument);
    };

    if text::is_lws(first) {
        if list.is_empty() {
            trace!("continuation line without a field");
            return Err(ParseError::Syntax);
        }
        let (chunk, consumed) = consume_value_line(&text[1..], options)?;
        trace!("continuation {:?}", chunk);
        if !chunk.is_empty() {
            list.extend_value(chunk, options)?;
        }
        return Ok(1 + consumed);
    }

    let name = text::consume_token(text)?;
    let rest = &text[name.len()..];
    match rest.first() {
        None => return Err(ParseError::Incomplete),
        Some(b':') => {}
        Some(_) => return Err(ParseError::Syntax),
    }

    let (value, consumed) = consume_value_line(&rest[1..], options)?;
    trace!("field {:?}: {:?}", name, value);
    list.open_field(name, value, options)?;
    Ok(name.len() + 1 + consumed)
}

/// Consume header lines into `list` until the blank line ending the block.
///
/// The list is cleared first. The blank line itself is left in `text`. Stops
/// at the end of input as well, so a caller can tell the two apart by looking
/// at what follows the consumed bytes.
pub fn consume_header_list<'a>(
    list: &mut HeaderList<'a>,
    text: &'a [u8],
    options: ConsumeOptions,
) -> Result<usize, ParseError> {
    list.clear(options);

    let mut consumed = 0;
    loop {
        let rest = &text[consumed..];
        if rest.is_empty() || text::is_crlf(rest) {
            break;
        }
        if text::is_partial_crlf(rest) {
            return Err(ParseError::Incomplete);
        }
        consumed += consume_field_line(list, rest, options)?;
    }

    trace!("{} header fields in {} bytes", list.len(), consumed);
    Ok(consumed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn consume_value_line_test() {
        let strict = ConsumeOptions::new();
        let lenient = ConsumeOptions::lenient();
        let tests: [(&[u8], ConsumeOptions, Result<(&[u8], usize), ParseError>); 13] = [
            (b"foo\r\n", strict, Ok((b"foo", 5))),
            (b"foo", strict, Err(ParseError::Incomplete)),
            (b"foo bar\r\n", strict, Ok((b"foo bar", 9))),
            (b"\t foo bar\r\n", strict, Ok((b"foo bar", 11))),
            (b"foo bar  \r\n", strict, Ok((b"foo bar", 11))),
            (b"Foo\r\nBar", strict, Ok((b"Foo", 5))),
            (b"  Foo\r\n", strict, Ok((b"Foo", 7))),
            (b"Foo \t\r\n", strict, Ok((b"Foo", 7))),
            (b"foo\r\n", lenient, Ok((b"foo", 5))),
            (b"foo", lenient, Ok((b"foo", 3))),
            (b"Foo\r\nBar", lenient, Ok((b"Foo", 5))),
            (b"   ", lenient, Ok((b"", 3))),
            (b"foo\r", lenient, Err(ParseError::Incomplete)),
        ];
        for (input, options, expected) in tests {
            let result = consume_value_line(input, options).map(|(v, n)| (v.as_bytes(), n));
            assert_eq!(result, expected, "{:?}", input.escape_ascii().to_string());
        }
    }

    #[test]
    fn consume_field_line_test() {
        let strict = ConsumeOptions::new();
        let lenient = ConsumeOptions::lenient();
        // lines are fed one after another into the same list
        let tests: [(&[u8], ConsumeOptions, Result<usize, ParseError>, &str, &str); 16] = [
            (b"Foo: Bar\r\n", strict, Ok(10), "Foo", "Bar"),
            (b"Foo : Bar\r\n", strict, Err(ParseError::Syntax), "", ""),
            (b"Content-Type: text/fun\r\n", strict, Ok(24), "Content-Type", "text/fun"),
            (b"Foo:\r\n", strict, Ok(6), "Foo", ""),
            (b"Foo:   \r\n", strict, Ok(9), "Foo", ""),
            (b" Bar\r\n", strict, Ok(6), "Foo", "Bar"),
            (b" \tBaz \r\n", strict, Ok(8), "Foo", "Bar Baz"),
            (b"Foo: Bar\r\n", lenient, Ok(10), "Foo", "Bar"),
            (b"Foo : Bar\r\n", lenient, Err(ParseError::Syntax), "", ""),
            (b"Foo:\r\n", lenient, Ok(6), "Foo", ""),
            (b" Bar\r\n", lenient, Ok(6), "Foo", "Bar"),
            (b"A:", lenient, Ok(2), "A", ""),
            (b"A: B ", lenient, Ok(5), "A", "B"),
            (b"\tC ", lenient, Ok(3), "A", "B C"),
            (b" ", lenient, Ok(1), "A", "B C"),
            (b"A", lenient, Err(ParseError::Incomplete), "", ""),
        ];

        let mut list = HeaderList::new();
        for (input, options, expected, name, value) in tests {
            let result = consume_field_line(&mut list, input, options);
            assert_eq!(result, expected, "{:?}", input.escape_ascii().to_string());
            if result.is_err() {
                continue;
            }
            let last = list.get(list.len() - 1).unwrap();
            assert_eq!(last.name(), name);
            assert_eq!(last.value().to_vec(), value.as_bytes());
        }
    }

    #[test]
    fn consume_field_line_errors_test() {
        let options = ConsumeOptions::new();
        let mut list = HeaderList::new();
        assert_eq!(
            consume_field_line(&mut list, b"", options),
            Err(ParseError::InvalidArgument)
        );
        assert_eq!(
            consume_field_line(&mut list, b" orphan\r\n", options),
            Err(ParseError::Syntax)
        );
        assert_eq!(
            consume_field_line(&mut list, b":value\r\n", options),
            Err(ParseError::Syntax)
        );
        assert_eq!(
            consume_field_line(&mut list, b"Name;x: y\r\n", options),
            Err(ParseError::Syntax)
        );
        assert!(list.is_empty());
    }

    #[test]
    fn consume_header_list_test() {
        let input = b"Host: example.org\r\nX-Folded: a\r\n  b\r\n\tc\r\nAccept: */*\r\n\r\nbody";
        let mut list = HeaderList::new();
        let consumed = consume_header_list(&mut list, input, ConsumeOptions::new()).unwrap();
        assert_eq!(&input[consumed..], b"\r\nbody");
        assert_eq!(list.len(), 3);
        assert_eq!(list.find("x-folded").unwrap().value().to_vec(), b"a b c");
        assert_eq!(list.find("ACCEPT").unwrap().value().to_vec(), b"*/*");

        // the list is cleared before parsing
        let consumed = consume_header_list(&mut list, b"\r\n", ConsumeOptions::new()).unwrap();
        assert_eq!(consumed, 0);
        assert!(list.is_empty());
    }

    #[test]
    fn consume_header_list_incomplete_test() {
        let options = ConsumeOptions::new();
        let mut list = HeaderList::new();
        assert_eq!(
            consume_header_list(&mut list, b"X: a", options),
            Err(ParseError::Incomplete)
        );
        assert_eq!(
            consume_header_list(&mut list, b"X: a\r\n\r", options),
            Err(ParseError::Incomplete)
        );
        assert_eq!(consume_header_list(&mut list, b"X: a\r\n", options), Ok(6));

        let consumed = consume_header_list(&mut list, b"X: a", ConsumeOptions::lenient());
        assert_eq!(consumed, Ok(4));
        assert_eq!(list.get(0).unwrap().value().to_vec(), b"a");
    }

    #[test]
    fn consume_header_list_capacity_test() {
        let options = ConsumeOptions::no_alloc();
        let mut list = HeaderList::bounded(2, 1).unwrap();
        assert_eq!(
            consume_header_list(&mut list, b"A: 1\r\nB: 2\r\nC: 3\r\n\r\n", options),
            Err(ParseError::Capacity)
        );
        assert_eq!(list.len(), 2);
        assert_eq!(list.get(1).unwrap().value().to_vec(), b"2");

        assert_eq!(
            consume_header_list(&mut list, b"A: 1\r\n 2\r\n\r\n", options),
            Err(ParseError::Capacity)
        );
        assert_eq!(list.get(0).unwrap().value().to_vec(), b"1");
    }
}
