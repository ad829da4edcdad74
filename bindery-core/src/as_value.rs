use crate::{Error, Result, Value, truncate_long};
#[cfg(feature = "chrono")]
use anyhow::Context;
#[cfg(feature = "chrono")]
use chrono::{Datelike, Timelike};
use rust_decimal::{Decimal, prelude::FromPrimitive};
use std::{any, borrow::Cow};
use time::{Date, OffsetDateTime, PrimitiveDateTime, Time};
use uuid::Uuid;

/// Convert both ways between Rust types and `Value`.
pub trait AsValue {
    /// Return a NULL equivalent variant for this type.
    fn as_empty_value() -> Value;
    /// Convert into owned `Value`.
    fn as_value(self) -> Value;
    /// Try to convert a dynamic `Value` into `Self`.
    fn try_from_value(value: Value) -> Result<Self>
    where
        Self: Sized;
}

fn conversion_error<T>(value: &Value) -> Error {
    Error::msg(format!(
        "Cannot convert {} to {}",
        truncate_long!(format!("{value:?}")),
        any::type_name::<T>(),
    ))
}

impl AsValue for Value {
    fn as_empty_value() -> Value {
        Value::Null
    }
    fn as_value(self) -> Value {
        self
    }
    fn try_from_value(value: Value) -> Result<Self> {
        Ok(value)
    }
}

macro_rules! impl_as_value {
    ($source:ty, $destination:path $(, $pat_rest:pat => $expr_rest:expr)* $(,)?) => {
        impl AsValue for $source {
            fn as_empty_value() -> Value {
                $destination(None)
            }
            fn as_value(self) -> Value {
                $destination(Some(self.into()))
            }
            fn try_from_value(value: Value) -> Result<Self> {
                match value {
                    $destination(Some(v)) => Ok(v.into()),
                    $($pat_rest => $expr_rest,)*
                    _ => Err(conversion_error::<Self>(&value)),
                }
            }
        }
    };
}

impl_as_value!(bool, Value::Boolean);
impl_as_value!(
    i8,
    Value::Int8,
    Value::Int16(Some(v)) => Ok(v.try_into()?),
    Value::Int32(Some(v)) => Ok(v.try_into()?),
    Value::Int64(Some(v)) => Ok(v.try_into()?),
);
impl_as_value!(
    i16,
    Value::Int16,
    Value::Int8(Some(v)) => Ok(v as _),
    Value::UInt8(Some(v)) => Ok(v as _),
    Value::Int32(Some(v)) => Ok(v.try_into()?),
    Value::Int64(Some(v)) => Ok(v.try_into()?),
);
impl_as_value!(
    i32,
    Value::Int32,
    Value::Int16(Some(v)) => Ok(v as _),
    Value::Int8(Some(v)) => Ok(v as _),
    Value::UInt16(Some(v)) => Ok(v as _),
    Value::UInt8(Some(v)) => Ok(v as _),
    // SQL INTEGER often comes back as i64
    Value::Int64(Some(v)) => Ok(v.try_into()?),
);
impl_as_value!(
    i64,
    Value::Int64,
    Value::Int32(Some(v)) => Ok(v as _),
    Value::Int16(Some(v)) => Ok(v as _),
    Value::Int8(Some(v)) => Ok(v as _),
    Value::UInt32(Some(v)) => Ok(v as _),
    Value::UInt16(Some(v)) => Ok(v as _),
    Value::UInt8(Some(v)) => Ok(v as _),
    Value::UInt64(Some(v)) => Ok(v.try_into()?),
);
impl_as_value!(
    u8,
    Value::UInt8,
    Value::Int16(Some(v)) => Ok(v.try_into()?),
    Value::Int32(Some(v)) => Ok(v.try_into()?),
);
impl_as_value!(
    u16,
    Value::UInt16,
    Value::UInt8(Some(v)) => Ok(v as _),
    Value::Int32(Some(v)) => Ok(v.try_into()?),
);
impl_as_value!(
    u32,
    Value::UInt32,
    Value::UInt16(Some(v)) => Ok(v as _),
    Value::UInt8(Some(v)) => Ok(v as _),
    Value::Int64(Some(v)) => Ok(v.try_into()?),
);
impl_as_value!(
    u64,
    Value::UInt64,
    Value::UInt32(Some(v)) => Ok(v as _),
    Value::UInt16(Some(v)) => Ok(v as _),
    Value::UInt8(Some(v)) => Ok(v as _),
    Value::Int64(Some(v)) => Ok(v.try_into()?),
);
impl_as_value!(f32, Value::Float32);
impl_as_value!(
    f64,
    Value::Float64,
    Value::Float32(Some(v)) => Ok(v as _),
);
impl_as_value!(
    Decimal,
    Value::Decimal,
    Value::Int64(Some(v)) => Ok(v.into()),
    Value::Int32(Some(v)) => Ok(v.into()),
    Value::Float64(Some(v)) => Decimal::from_f64(v)
        .ok_or(Error::msg(format!("Value {v}: f64 does not fit into Decimal"))),
);
impl_as_value!(
    String,
    Value::Varchar,
    Value::Json(Some(serde_json::Value::String(v))) => Ok(v),
);
impl_as_value!(Cow<'static, str>, Value::Varchar);
impl_as_value!(Box<[u8]>, Value::Blob);
impl_as_value!(Date, Value::Date);
impl_as_value!(Time, Value::Time);
impl_as_value!(PrimitiveDateTime, Value::Timestamp);
impl_as_value!(OffsetDateTime, Value::TimestampWithTimezone);
impl_as_value!(
    Uuid,
    Value::Uuid,
    Value::Varchar(Some(v)) => Ok(Uuid::parse_str(&v)?),
);
impl_as_value!(serde_json::Value, Value::Json);

impl AsValue for &'static str {
    fn as_empty_value() -> Value {
        Value::Varchar(None)
    }
    fn as_value(self) -> Value {
        Value::Varchar(Some(Cow::Borrowed(self)))
    }
    fn try_from_value(value: Value) -> Result<Self> {
        match value {
            Value::Varchar(Some(Cow::Borrowed(v))) => Ok(v),
            _ => Err(conversion_error::<Self>(&value)),
        }
    }
}

impl<T: AsValue> AsValue for Option<T> {
    fn as_empty_value() -> Value {
        T::as_empty_value()
    }
    fn as_value(self) -> Value {
        match self {
            Some(v) => v.as_value(),
            None => T::as_empty_value(),
        }
    }
    fn try_from_value(value: Value) -> Result<Self> {
        if value.is_null() {
            return Ok(None);
        }
        Ok(Some(T::try_from_value(value)?))
    }
}

impl<T: AsValue> AsValue for Vec<T> {
    fn as_empty_value() -> Value {
        Value::List(None, Box::new(T::as_empty_value()))
    }
    fn as_value(self) -> Value {
        Value::List(
            Some(self.into_iter().map(AsValue::as_value).collect()),
            Box::new(T::as_empty_value()),
        )
    }
    fn try_from_value(value: Value) -> Result<Self> {
        match value {
            Value::List(Some(v), ..) => v.into_iter().map(T::try_from_value).collect(),
            _ => Err(conversion_error::<Self>(&value)),
        }
    }
}

#[cfg(feature = "chrono")]
impl AsValue for chrono::NaiveDate {
    fn as_empty_value() -> Value {
        Value::Date(None)
    }
    fn as_value(self) -> Value {
        Value::Date(
            time::Month::try_from(self.month() as u8)
                .and_then(|month| Date::from_calendar_date(self.year(), month, self.day() as _))
                .inspect_err(|e| {
                    log::error!("Could not create a Value::Date from chrono::NaiveDate: {e:?}");
                })
                .ok(),
        )
    }
    fn try_from_value(value: Value) -> Result<Self> {
        let context = format!("Could not create a chrono::NaiveDate from {value:?}");
        let v = Date::try_from_value(value).context(context.clone())?;
        chrono::NaiveDate::from_ymd_opt(v.year(), u8::from(v.month()) as _, v.day() as _)
            .context(context)
    }
}

#[cfg(feature = "chrono")]
impl AsValue for chrono::NaiveTime {
    fn as_empty_value() -> Value {
        Value::Time(None)
    }
    fn as_value(self) -> Value {
        Value::Time(
            Time::from_hms_nano(
                self.hour() as _,
                self.minute() as _,
                self.second() as _,
                self.nanosecond(),
            )
            .inspect_err(|e| {
                log::error!("Could not create a Value::Time from chrono::NaiveTime: {e:?}")
            })
            .ok(),
        )
    }
    fn try_from_value(value: Value) -> Result<Self> {
        let context = format!("Could not create a chrono::NaiveTime from {value:?}");
        let v = Time::try_from_value(value).context(context.clone())?;
        Self::from_hms_nano_opt(
            v.hour() as _,
            v.minute() as _,
            v.second() as _,
            v.nanosecond(),
        )
        .context(context)
    }
}

#[cfg(feature = "chrono")]
impl AsValue for chrono::NaiveDateTime {
    fn as_empty_value() -> Value {
        Value::Timestamp(None)
    }
    fn as_value(self) -> Value {
        let date = Date::try_from_value(self.date().as_value());
        let time = Time::try_from_value(self.time().as_value());
        Value::Timestamp(match (date, time) {
            (Ok(date), Ok(time)) => Some(PrimitiveDateTime::new(date, time)),
            (Err(e), ..) | (.., Err(e)) => {
                log::error!(
                    "Could not create a Value::Timestamp from chrono::NaiveDateTime: {e:?}"
                );
                None
            }
        })
    }
    fn try_from_value(value: Value) -> Result<Self> {
        let context = format!("Could not create a chrono::NaiveDateTime from {value:?}");
        let v = PrimitiveDateTime::try_from_value(value).context(context.clone())?;
        let date = chrono::NaiveDate::try_from_value(v.date().as_value())
            .context(context.clone())?;
        let time = chrono::NaiveTime::try_from_value(v.time().as_value()).context(context)?;
        Ok(Self::new(date, time))
    }
}
