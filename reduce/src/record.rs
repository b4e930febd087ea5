use std::{
    fmt,
    io::{self, Read, Write},
};

use serde::{
    de::{self, IgnoredAny, MapAccess, Visitor},
    Deserialize, Deserializer, Serialize,
};
use serde_json::{de::IoRead, StreamDeserializer};

// Field names match case-insensitively, a missing or null field stays empty,
// invalid UTF-8 in strings is replaced, and a bare `null` is an empty record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct KeyValue {
    pub key: String,
    pub value: String,
}

impl KeyValue {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

struct LossyString(String);

impl<'de> Deserialize<'de> for LossyString {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_bytes(LossyStringVisitor)
    }
}

struct LossyStringVisitor;

impl<'de> Visitor<'de> for LossyStringVisitor {
    type Value = LossyString;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a string")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<LossyString, E> {
        Ok(LossyString(v.to_owned()))
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<LossyString, E> {
        Ok(LossyString(v))
    }

    fn visit_bytes<E: de::Error>(self, v: &[u8]) -> Result<LossyString, E> {
        Ok(LossyString(String::from_utf8_lossy(v).into_owned()))
    }

    fn visit_byte_buf<E: de::Error>(self, v: Vec<u8>) -> Result<LossyString, E> {
        Ok(LossyString(match String::from_utf8(v) {
            Ok(s) => s,
            Err(e) => String::from_utf8_lossy(e.as_bytes()).into_owned(),
        }))
    }
}

struct KeyValueVisitor;

impl<'de> Visitor<'de> for KeyValueVisitor {
    type Value = KeyValue;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a key/value object")
    }

    fn visit_unit<E: de::Error>(self) -> Result<KeyValue, E> {
        Ok(KeyValue::default())
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<KeyValue, A::Error> {
        let mut kv = KeyValue::default();
        while let Some(LossyString(field)) = map.next_key()? {
            let slot = if field.eq_ignore_ascii_case("key") {
                &mut kv.key
            } else if field.eq_ignore_ascii_case("value") {
                &mut kv.value
            } else {
                map.next_value::<IgnoredAny>()?;
                continue;
            };
            if let Some(LossyString(s)) = map.next_value()? {
                *slot = s;
            }
        }
        Ok(kv)
    }
}

impl<'de> Deserialize<'de> for KeyValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(KeyValueVisitor)
    }
}

pub struct RecordDecoder<R: Read> {
    stream: StreamDeserializer<'static, IoRead<R>, KeyValue>,
}

impl<R: Read> RecordDecoder<R> {
    pub fn new(reader: R) -> Self {
        Self {
            stream: serde_json::Deserializer::from_reader(reader).into_iter(),
        }
    }

    // Ok(None) is a clean end of stream
    pub fn next_record(&mut self) -> serde_json::Result<Option<KeyValue>> {
        self.stream.next().transpose()
    }
}

pub struct RecordEncoder<W: Write> {
    writer: W,
}

impl<W: Write> RecordEncoder<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn encode(&mut self, kv: &KeyValue) -> io::Result<()> {
        serde_json::to_writer(&mut self.writer, kv)?;
        self.writer.write_all(b"\n")
    }

    pub fn finish(mut self) -> io::Result<W> {
        self.writer.flush()?;
        Ok(self.writer)
    }
}

#[cfg(test)]
mod tests {
    use super::{KeyValue, RecordDecoder, RecordEncoder};

    #[test]
    fn wire_format() {
        let mut enc = RecordEncoder::new(Vec::new());
        enc.encode(&KeyValue::new("a", "1,3")).unwrap();
        enc.encode(&KeyValue::new("b", "2")).unwrap();
        let bytes = enc.finish().unwrap();
        assert_eq!(
            String::from_utf8(bytes).unwrap(),
            "{\"Key\":\"a\",\"Value\":\"1,3\"}\n{\"Key\":\"b\",\"Value\":\"2\"}\n"
        );
    }

    #[test]
    fn decode_until_end() {
        let input: &[u8] = b"{\"Key\":\"x\",\"Value\":\"_\"}\n{\"Key\":\"y\",\"Value\":\"\"}";
        let mut dec = RecordDecoder::new(input);
        assert_eq!(dec.next_record().unwrap(), Some(KeyValue::new("x", "_")));
        assert_eq!(dec.next_record().unwrap(), Some(KeyValue::new("y", "")));
        assert_eq!(dec.next_record().unwrap(), None);
    }

    #[test]
    fn empty_stream() {
        let mut dec = RecordDecoder::new(&b""[..]);
        assert_eq!(dec.next_record().unwrap(), None);
    }

    #[test]
    fn trailing_garbage_is_an_error() {
        let input: &[u8] = b"{\"Key\":\"x\",\"Value\":\"1\"}\n{\"Key\":\"y\",";
        let mut dec = RecordDecoder::new(input);
        assert!(dec.next_record().unwrap().is_some());
        assert!(dec.next_record().is_err());
    }

    #[test]
    fn wrong_shape_is_an_error() {
        let mut dec = RecordDecoder::new(&b"[1, 2]"[..]);
        assert!(dec.next_record().is_err());
    }

    #[test]
    fn lenient_fields() {
        let input: &[u8] = b"{\"Key\":\"b\"}\n\
            {\"Key\":\"c\",\"Value\":null}\n\
            {\"key\":\"d\",\"VALUE\":\"4\",\"extra\":[1,{}]}\n\
            {\"Key\":\"e\xff\",\"Value\":\"5\"}\n\
            null\n";
        let mut dec = RecordDecoder::new(input);
        let mut kvs = Vec::new();
        while let Some(kv) = dec.next_record().unwrap() {
            kvs.push(kv);
        }
        assert_eq!(
            kvs,
            vec![
                KeyValue::new("b", ""),
                KeyValue::new("c", ""),
                KeyValue::new("d", "4"),
                KeyValue::new("e\u{fffd}", "5"),
                KeyValue::default(),
            ]
        );
    }

    #[test]
    fn escapes() {
        let mut dec = RecordDecoder::new(&br#"{"Key":"a\"b\u00e9","Value":"\n"}"#[..]);
        assert_eq!(dec.next_record().unwrap(), Some(KeyValue::new("a\"b\u{e9}", "\n")));
    }

    #[test]
    fn non_string_value_is_an_error() {
        let mut dec = RecordDecoder::new(&b"{\"Key\":\"a\",\"Value\":5}"[..]);
        assert!(dec.next_record().is_err());
    }
}
