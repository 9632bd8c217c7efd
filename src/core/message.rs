//! Variadic message payloads

use super::value::{Fields, Value};

/// Arguments accepted by the severity methods.
///
/// Implemented for `()`, single values, arrays, vectors and tuples of up to
/// six values so `logger.info(("user", id, "logged in"))` reads naturally.
pub trait IntoMessages {
    fn into_messages(self) -> Vec<Value>;
}

impl IntoMessages for () {
    fn into_messages(self) -> Vec<Value> {
        Vec::new()
    }
}

impl<T: Into<Value>> IntoMessages for Vec<T> {
    fn into_messages(self) -> Vec<Value> {
        self.into_iter().map(Into::into).collect()
    }
}

impl<T: Into<Value>, const N: usize> IntoMessages for [T; N] {
    fn into_messages(self) -> Vec<Value> {
        self.into_iter().map(Into::into).collect()
    }
}

macro_rules! single_message {
    ($($ty:ty),* $(,)?) => {
        $(
            impl IntoMessages for $ty {
                fn into_messages(self) -> Vec<Value> {
                    vec![self.into()]
                }
            }
        )*
    };
}

single_message!(Value, &str, String, &String, i64, i32, u32, f64, bool, Fields);

macro_rules! tuple_messages {
    ($($name:ident),+) => {
        impl<$($name: Into<Value>),+> IntoMessages for ($($name,)+) {
            #[allow(non_snake_case)]
            fn into_messages(self) -> Vec<Value> {
                let ($($name,)+) = self;
                vec![$($name.into()),+]
            }
        }
    };
}

tuple_messages!(A);
tuple_messages!(A, B);
tuple_messages!(A, B, C);
tuple_messages!(A, B, C, D);
tuple_messages!(A, B, C, D, E);
tuple_messages!(A, B, C, D, E, F);
