//! The "no value" hook used by `contains_key_with_value`.
//!
//! A key can be present while holding a null value. Which values count as
//! null depends on the element type, so concrete collections pick it through
//! this trait.

/// Element types that have a designated null value.
pub trait Nullable {
    /// Returns `true` if this value is the null sentinel.
    fn is_null(&self) -> bool;
}

impl<T> Nullable for Option<T> {
    #[inline]
    fn is_null(&self) -> bool {
        self.is_none()
    }
}

#[cfg(feature = "serde")]
impl Nullable for serde_json::Value {
    #[inline]
    fn is_null(&self) -> bool {
        serde_json::Value::is_null(self)
    }
}

macro_rules! never_null {
    ($($t:ty),* $(,)?) => {
        $(
            impl Nullable for $t {
                #[inline(always)]
                fn is_null(&self) -> bool {
                    false
                }
            }
        )*
    };
}

never_null!(
    bool, char, i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64, String,
    &str,
);

impl<T> Nullable for Vec<T> {
    #[inline(always)]
    fn is_null(&self) -> bool {
        false
    }
}

impl<T: Nullable + ?Sized> Nullable for Box<T> {
    #[inline]
    fn is_null(&self) -> bool {
        (**self).is_null()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nullable_option() {
        assert!(None::<i32>.is_null());
        assert!(!Some(0).is_null());
    }

    #[test]
    fn test_nullable_scalars_never_null() {
        assert!(!0i32.is_null());
        assert!(!String::new().is_null());
        assert!(!"".is_null());
        assert!(!Vec::<u8>::new().is_null());
        assert!(Box::new(None::<u8>).is_null());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_nullable_json_value() {
        assert!(serde_json::Value::Null.is_null());
        assert!(!serde_json::json!(false).is_null());
    }
}
