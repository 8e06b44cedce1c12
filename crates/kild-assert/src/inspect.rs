//! Runtime inspection of arbitrary values.
//!
//! Values are serialized into a typed [`Value`] tree. The tree keeps every
//! distinction serde reports: integer and float widths, `char` vs `str`,
//! `None`/`Some`, unit vs newtype vs struct variants, type and field names.
//! Equality on the tree is a recursive structural comparison; floats compare
//! as floats (`NaN` never equals anything) and map entries compare without
//! regard to iteration order.

use std::borrow::Cow;
use std::fmt::Display;

use serde::Serialize;
use serde::ser::{self, Serializer};

use crate::errors::InspectError;

/// Typed snapshot of a serialized value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Unit,
    Bool(bool),
    I8(i8),
    I16(i16),
    I32(i32),
    I64(i64),
    I128(i128),
    U8(u8),
    U16(u16),
    U32(u32),
    U64(u64),
    U128(u128),
    F32(f32),
    F64(f64),
    Char(char),
    Str(String),
    None,
    Some(Box<Value>),
    UnitStruct(&'static str),
    NewtypeStruct(&'static str, Box<Value>),
    TupleStruct(&'static str, Vec<Value>),
    Struct(&'static str, Vec<(&'static str, Value)>),
    UnitVariant {
        name: &'static str,
        variant: &'static str,
    },
    NewtypeVariant {
        name: &'static str,
        variant: &'static str,
        value: Box<Value>,
    },
    TupleVariant {
        name: &'static str,
        variant: &'static str,
        fields: Vec<Value>,
    },
    StructVariant {
        name: &'static str,
        variant: &'static str,
        fields: Vec<(&'static str, Value)>,
    },
    /// Slices, `Vec`, arrays, tuples, sets and byte buffers.
    Seq(Vec<Value>),
    Map(Entries),
}

impl Value {
    /// Text content for `str`, `String` and `char` values.
    pub fn as_text(&self) -> Option<Cow<'_, str>> {
        match self {
            Value::Str(s) => Some(Cow::Borrowed(s.as_str())),
            Value::Char(c) => Some(Cow::Owned(c.to_string())),
            _ => None,
        }
    }
}

/// Map entries in serialization order.
///
/// Two maps are equal when they hold the same key/value pairs, whatever the
/// order they were produced in (`HashMap` iteration order is not stable).
#[derive(Debug, Clone, Default)]
pub struct Entries(pub Vec<(Value, Value)>);

impl PartialEq for Entries {
    fn eq(&self, other: &Self) -> bool {
        self.0.len() == other.0.len()
            && self
                .0
                .iter()
                .all(|(key, value)| other.0.iter().any(|(k, v)| k == key && v == value))
    }
}

/// Coarse runtime shape of an inspected value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    /// `()` and unit structs.
    Unit,
    Bool,
    Number,
    /// `str`, `String`, `char`.
    Text,
    /// `Option`.
    Optional,
    /// Slices, `Vec`, arrays, tuples, sets.
    Sequence,
    /// Maps.
    Mapping,
    /// Structs, tuple structs and newtypes.
    Record,
    /// Enum variants.
    Variant,
}

impl Shape {
    pub fn of(value: &Value) -> Self {
        match value {
            Value::Unit | Value::UnitStruct(_) => Shape::Unit,
            Value::Bool(_) => Shape::Bool,
            Value::I8(_)
            | Value::I16(_)
            | Value::I32(_)
            | Value::I64(_)
            | Value::I128(_)
            | Value::U8(_)
            | Value::U16(_)
            | Value::U32(_)
            | Value::U64(_)
            | Value::U128(_)
            | Value::F32(_)
            | Value::F64(_) => Shape::Number,
            Value::Char(_) | Value::Str(_) => Shape::Text,
            Value::None | Value::Some(_) => Shape::Optional,
            Value::Seq(_) => Shape::Sequence,
            Value::Map(_) => Shape::Mapping,
            Value::NewtypeStruct(..) | Value::TupleStruct(..) | Value::Struct(..) => Shape::Record,
            Value::UnitVariant { .. }
            | Value::NewtypeVariant { .. }
            | Value::TupleVariant { .. }
            | Value::StructVariant { .. } => Shape::Variant,
        }
    }
}

/// Serialize `value` into an inspectable tree.
pub fn inspect<T: Serialize + ?Sized>(value: &T) -> Result<Value, InspectError> {
    value.serialize(ValueSerializer)
}

impl ser::Error for InspectError {
    fn custom<T: Display>(msg: T) -> Self {
        InspectError::Custom {
            message: msg.to_string(),
        }
    }
}

/// Serializer producing a [`Value`].
#[derive(Debug, Clone, Copy, Default)]
pub struct ValueSerializer;

impl Serializer for ValueSerializer {
    type Ok = Value;
    type Error = InspectError;
    type SerializeSeq = SeqBuilder;
    type SerializeTuple = SeqBuilder;
    type SerializeTupleStruct = TupleStructBuilder;
    type SerializeTupleVariant = TupleVariantBuilder;
    type SerializeMap = MapBuilder;
    type SerializeStruct = StructBuilder;
    type SerializeStructVariant = StructVariantBuilder;

    fn serialize_bool(self, v: bool) -> Result<Value, InspectError> {
        Ok(Value::Bool(v))
    }

    fn serialize_i8(self, v: i8) -> Result<Value, InspectError> {
        Ok(Value::I8(v))
    }

    fn serialize_i16(self, v: i16) -> Result<Value, InspectError> {
        Ok(Value::I16(v))
    }

    fn serialize_i32(self, v: i32) -> Result<Value, InspectError> {
        Ok(Value::I32(v))
    }

    fn serialize_i64(self, v: i64) -> Result<Value, InspectError> {
        Ok(Value::I64(v))
    }

    fn serialize_i128(self, v: i128) -> Result<Value, InspectError> {
        Ok(Value::I128(v))
    }

    fn serialize_u8(self, v: u8) -> Result<Value, InspectError> {
        Ok(Value::U8(v))
    }

    fn serialize_u16(self, v: u16) -> Result<Value, InspectError> {
        Ok(Value::U16(v))
    }

    fn serialize_u32(self, v: u32) -> Result<Value, InspectError> {
        Ok(Value::U32(v))
    }

    fn serialize_u64(self, v: u64) -> Result<Value, InspectError> {
        Ok(Value::U64(v))
    }

    fn serialize_u128(self, v: u128) -> Result<Value, InspectError> {
        Ok(Value::U128(v))
    }

    fn serialize_f32(self, v: f32) -> Result<Value, InspectError> {
        Ok(Value::F32(v))
    }

    fn serialize_f64(self, v: f64) -> Result<Value, InspectError> {
        Ok(Value::F64(v))
    }

    fn serialize_char(self, v: char) -> Result<Value, InspectError> {
        Ok(Value::Char(v))
    }

    fn serialize_str(self, v: &str) -> Result<Value, InspectError> {
        Ok(Value::Str(v.to_owned()))
    }

    // Byte buffers are sequences of u8, the same as `&[u8]` and `Vec<u8>`.
    fn serialize_bytes(self, v: &[u8]) -> Result<Value, InspectError> {
        Ok(Value::Seq(v.iter().copied().map(Value::U8).collect()))
    }

    fn serialize_none(self) -> Result<Value, InspectError> {
        Ok(Value::None)
    }

    fn serialize_some<T: ?Sized + Serialize>(self, value: &T) -> Result<Value, InspectError> {
        Ok(Value::Some(Box::new(value.serialize(ValueSerializer)?)))
    }

    fn serialize_unit(self) -> Result<Value, InspectError> {
        Ok(Value::Unit)
    }

    fn serialize_unit_struct(self, name: &'static str) -> Result<Value, InspectError> {
        Ok(Value::UnitStruct(name))
    }

    fn serialize_unit_variant(
        self,
        name: &'static str,
        _variant_index: u32,
        variant: &'static str,
    ) -> Result<Value, InspectError> {
        Ok(Value::UnitVariant { name, variant })
    }

    fn serialize_newtype_struct<T: ?Sized + Serialize>(
        self,
        name: &'static str,
        value: &T,
    ) -> Result<Value, InspectError> {
        Ok(Value::NewtypeStruct(
            name,
            Box::new(value.serialize(ValueSerializer)?),
        ))
    }

    fn serialize_newtype_variant<T: ?Sized + Serialize>(
        self,
        name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        value: &T,
    ) -> Result<Value, InspectError> {
        Ok(Value::NewtypeVariant {
            name,
            variant,
            value: Box::new(value.serialize(ValueSerializer)?),
        })
    }

    fn serialize_seq(self, len: Option<usize>) -> Result<SeqBuilder, InspectError> {
        Ok(SeqBuilder {
            items: Vec::with_capacity(len.unwrap_or(0)),
        })
    }

    fn serialize_tuple(self, len: usize) -> Result<SeqBuilder, InspectError> {
        Ok(SeqBuilder {
            items: Vec::with_capacity(len),
        })
    }

    fn serialize_tuple_struct(
        self,
        name: &'static str,
        len: usize,
    ) -> Result<TupleStructBuilder, InspectError> {
        Ok(TupleStructBuilder {
            name,
            fields: Vec::with_capacity(len),
        })
    }

    fn serialize_tuple_variant(
        self,
        name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        len: usize,
    ) -> Result<TupleVariantBuilder, InspectError> {
        Ok(TupleVariantBuilder {
            name,
            variant,
            fields: Vec::with_capacity(len),
        })
    }

    fn serialize_map(self, len: Option<usize>) -> Result<MapBuilder, InspectError> {
        Ok(MapBuilder {
            entries: Vec::with_capacity(len.unwrap_or(0)),
            pending_key: None,
        })
    }

    fn serialize_struct(
        self,
        name: &'static str,
        len: usize,
    ) -> Result<StructBuilder, InspectError> {
        Ok(StructBuilder {
            name,
            fields: Vec::with_capacity(len),
        })
    }

    fn serialize_struct_variant(
        self,
        name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        len: usize,
    ) -> Result<StructVariantBuilder, InspectError> {
        Ok(StructVariantBuilder {
            name,
            variant,
            fields: Vec::with_capacity(len),
        })
    }
}

#[derive(Debug)]
pub struct SeqBuilder {
    items: Vec<Value>,
}

impl ser::SerializeSeq for SeqBuilder {
    type Ok = Value;
    type Error = InspectError;

    fn serialize_element<T: ?Sized + Serialize>(&mut self, value: &T) -> Result<(), InspectError> {
        self.items.push(value.serialize(ValueSerializer)?);
        Ok(())
    }

    fn end(self) -> Result<Value, InspectError> {
        Ok(Value::Seq(self.items))
    }
}

impl ser::SerializeTuple for SeqBuilder {
    type Ok = Value;
    type Error = InspectError;

    fn serialize_element<T: ?Sized + Serialize>(&mut self, value: &T) -> Result<(), InspectError> {
        ser::SerializeSeq::serialize_element(self, value)
    }

    fn end(self) -> Result<Value, InspectError> {
        ser::SerializeSeq::end(self)
    }
}

#[derive(Debug)]
pub struct TupleStructBuilder {
    name: &'static str,
    fields: Vec<Value>,
}

impl ser::SerializeTupleStruct for TupleStructBuilder {
    type Ok = Value;
    type Error = InspectError;

    fn serialize_field<T: ?Sized + Serialize>(&mut self, value: &T) -> Result<(), InspectError> {
        self.fields.push(value.serialize(ValueSerializer)?);
        Ok(())
    }

    fn end(self) -> Result<Value, InspectError> {
        Ok(Value::TupleStruct(self.name, self.fields))
    }
}

#[derive(Debug)]
pub struct TupleVariantBuilder {
    name: &'static str,
    variant: &'static str,
    fields: Vec<Value>,
}

impl ser::SerializeTupleVariant for TupleVariantBuilder {
    type Ok = Value;
    type Error = InspectError;

    fn serialize_field<T: ?Sized + Serialize>(&mut self, value: &T) -> Result<(), InspectError> {
        self.fields.push(value.serialize(ValueSerializer)?);
        Ok(())
    }

    fn end(self) -> Result<Value, InspectError> {
        Ok(Value::TupleVariant {
            name: self.name,
            variant: self.variant,
            fields: self.fields,
        })
    }
}

#[derive(Debug)]
pub struct MapBuilder {
    entries: Vec<(Value, Value)>,
    pending_key: Option<Value>,
}

impl ser::SerializeMap for MapBuilder {
    type Ok = Value;
    type Error = InspectError;

    fn serialize_key<T: ?Sized + Serialize>(&mut self, key: &T) -> Result<(), InspectError> {
        self.pending_key = Some(key.serialize(ValueSerializer)?);
        Ok(())
    }

    fn serialize_value<T: ?Sized + Serialize>(&mut self, value: &T) -> Result<(), InspectError> {
        let key = self.pending_key.take().ok_or_else(|| InspectError::Custom {
            message: "map value serialized before its key".to_string(),
        })?;
        self.entries.push((key, value.serialize(ValueSerializer)?));
        Ok(())
    }

    fn end(self) -> Result<Value, InspectError> {
        Ok(Value::Map(Entries(self.entries)))
    }
}

#[derive(Debug)]
pub struct StructBuilder {
    name: &'static str,
    fields: Vec<(&'static str, Value)>,
}

impl ser::SerializeStruct for StructBuilder {
    type Ok = Value;
    type Error = InspectError;

    fn serialize_field<T: ?Sized + Serialize>(
        &mut self,
        key: &'static str,
        value: &T,
    ) -> Result<(), InspectError> {
        self.fields.push((key, value.serialize(ValueSerializer)?));
        Ok(())
    }

    fn end(self) -> Result<Value, InspectError> {
        Ok(Value::Struct(self.name, self.fields))
    }
}

#[derive(Debug)]
pub struct StructVariantBuilder {
    name: &'static str,
    variant: &'static str,
    fields: Vec<(&'static str, Value)>,
}

impl ser::SerializeStructVariant for StructVariantBuilder {
    type Ok = Value;
    type Error = InspectError;

    fn serialize_field<T: ?Sized + Serialize>(
        &mut self,
        key: &'static str,
        value: &T,
    ) -> Result<(), InspectError> {
        self.fields.push((key, value.serialize(ValueSerializer)?));
        Ok(())
    }

    fn end(self) -> Result<Value, InspectError> {
        Ok(Value::StructVariant {
            name: self.name,
            variant: self.variant,
            fields: self.fields,
        })
    }
}
