/// Makes sure a type implements some traits
///
/// Expands to a test-only function that fails to compile when one of the
/// traits is missing.
///
/// ```ignore
/// assert_trait!(sentence_is_shareable; Sentence; Send, Sync);
/// ```
#[macro_export]
macro_rules! assert_trait {
    ($name:ident; $to_test:ty; $($trait:path),+ $(,)?) => {
        $crate::paste::paste! {
            #[cfg(test)]
            #[allow(dead_code)]
            fn [<_assert_ $name:snake>]() {
                fn implements<T: ?Sized $(+ $trait)+>() {}
                implements::<$to_test>();
            }
        }
    };
}

/// Same as [assert_trait] but for several types sharing the same bounds
#[macro_export]
macro_rules! assert_traits {
    ($name:ident; [$($to_test:ty),+ $(,)?]; $($trait:path),+ $(,)?) => {
        $crate::paste::paste! {
            #[cfg(test)]
            #[allow(dead_code)]
            fn [<_assert_ $name:snake>]() {
                fn implements<T: ?Sized $(+ $trait)+>() {}
                $(implements::<$to_test>();)+
            }
        }
    };
}
