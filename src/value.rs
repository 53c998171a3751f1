use crate::error::{Error, Result};
use crate::{ser, Compound, Endian, Tag};

/// A complete NBT value. It owns its data.
///
/// There is no `End` variant: the end marker terminates a compound's member
/// stream on the wire and never appears as a standalone value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Byte(i8),
    Short(i16),
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    String(String),
    ByteArray(Vec<i8>),
    IntArray(Vec<i32>),
    LongArray(Vec<i64>),
    List(List),
    Compound(Compound),
}

impl Value {
    /// The wire id of this value's tag type.
    pub fn tag(&self) -> Tag {
        match self {
            Value::Byte(_) => Tag::Byte,
            Value::Short(_) => Tag::Short,
            Value::Int(_) => Tag::Int,
            Value::Long(_) => Tag::Long,
            Value::Float(_) => Tag::Float,
            Value::Double(_) => Tag::Double,
            Value::String(_) => Tag::String,
            Value::ByteArray(_) => Tag::ByteArray,
            Value::IntArray(_) => Tag::IntArray,
            Value::LongArray(_) => Tag::LongArray,
            Value::List(_) => Tag::List,
            Value::Compound(_) => Tag::Compound,
        }
    }

    /// Build a Byte, checking the value fits. Callers holding user-supplied
    /// numbers go through these rather than casting.
    pub fn byte_from(value: i64) -> Result<Value> {
        match i8::try_from(value) {
            Ok(v) => Ok(Value::Byte(v)),
            Err(_) => Err(Error::Range {
                tag: Tag::Byte,
                value,
            }),
        }
    }

    /// Build a Short, checking the value fits.
    pub fn short_from(value: i64) -> Result<Value> {
        match i16::try_from(value) {
            Ok(v) => Ok(Value::Short(v)),
            Err(_) => Err(Error::Range {
                tag: Tag::Short,
                value,
            }),
        }
    }

    /// Build an Int, checking the value fits.
    pub fn int_from(value: i64) -> Result<Value> {
        match i32::try_from(value) {
            Ok(v) => Ok(Value::Int(v)),
            Err(_) => Err(Error::Range {
                tag: Tag::Int,
                value,
            }),
        }
    }

    /// Build a Long. Longs cover the whole 64-bit range, so this cannot fail.
    pub fn long_from(value: i64) -> Value {
        Value::Long(value)
    }

    /// The payload-only byte encoding of this value in the given byte order.
    /// The type id and name are written by the enclosing context, so this is
    /// exactly what sits inside a list element or after a member's name.
    pub fn to_payload_bytes(&self, endian: Endian) -> Result<Vec<u8>> {
        let mut enc = ser::Encoder::new(endian);
        ser::write_payload(&mut enc, self)?;
        Ok(enc.into_bytes())
    }

    /// A lossy JSON projection of this value, for display and interchange.
    ///
    /// Numeric and string leaves become their natural JSON scalar, the array
    /// tags become JSON arrays of numbers, lists recurse, and compounds become
    /// JSON objects in insertion order. The projection loses the distinction
    /// between the integer widths and between lists and arrays, and there is
    /// no inverse. Non-finite floats become JSON null.
    pub fn to_json(&self) -> serde_json::Value {
        use serde_json::json;

        match self {
            Value::Byte(v) => json!(v),
            Value::Short(v) => json!(v),
            Value::Int(v) => json!(v),
            Value::Long(v) => json!(v),
            Value::Float(v) => json!(v),
            Value::Double(v) => json!(v),
            Value::String(v) => json!(v),
            Value::ByteArray(vs) => json!(vs),
            Value::IntArray(vs) => json!(vs),
            Value::LongArray(vs) => json!(vs),
            Value::List(list) => {
                serde_json::Value::Array(list.iter().map(Value::to_json).collect())
            }
            Value::Compound(c) => {
                let mut obj = serde_json::Map::new();
                for (name, value) in c.iter() {
                    obj.insert(name.clone(), value.to_json());
                }
                serde_json::Value::Object(obj)
            }
        }
    }
}

/// An ordered sequence of values that all share one tag type.
///
/// Elements on the wire are payload-only, so the list itself declares the
/// element type. An empty list's element type is [`Tag::End`].
#[derive(Debug, Clone, PartialEq)]
pub struct List {
    element_tag: Tag,
    values: Vec<Value>,
}

impl List {
    /// An empty list. Its element type is `End` until something is pushed.
    pub fn empty() -> List {
        List {
            element_tag: Tag::End,
            values: Vec::new(),
        }
    }

    /// Build a list with a declared element type. Every value must report
    /// that type.
    pub fn new(element_tag: Tag, values: Vec<Value>) -> Result<List> {
        for v in &values {
            if v.tag() != element_tag {
                return Err(Error::ListMixed {
                    expected: element_tag,
                    found: v.tag(),
                });
            }
        }
        Ok(List {
            element_tag,
            values,
        })
    }

    /// Build a list whose element type is taken from the first value. An
    /// empty input produces an empty `End` list.
    pub fn try_from_values(values: Vec<Value>) -> Result<List> {
        match values.first() {
            Some(first) => {
                let tag = first.tag();
                List::new(tag, values)
            }
            None => Ok(List::empty()),
        }
    }

    pub fn element_tag(&self) -> Tag {
        self.element_tag
    }

    /// Append a value. The first push into an empty list fixes the element
    /// type; later pushes must match it.
    pub fn push(&mut self, value: Value) -> Result<()> {
        if self.values.is_empty() && self.element_tag == Tag::End {
            self.element_tag = value.tag();
        } else if value.tag() != self.element_tag {
            return Err(Error::ListMixed {
                expected: self.element_tag,
                found: value.tag(),
            });
        }
        self.values.push(value);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Value> {
        self.values.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut Value> {
        self.values.get_mut(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Value> {
        self.values.iter()
    }

    pub fn values(&self) -> &[Value] {
        &self.values
    }
}
