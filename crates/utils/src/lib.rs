pub mod ord_util;
pub mod test_utils;
pub mod traits;

#[doc(hidden)]
pub use paste;

/// Shorthand for an argument accepting anything that iterates over `$t`
///
/// ```
/// fn count(items: utils::implvec!(u8)) -> usize {
///     items.into_iter().count()
/// }
/// assert_eq!(count([1, 2, 3]), 3);
/// ```
#[macro_export]
macro_rules! implvec {
    ($t:ty) => {
        impl ::std::iter::IntoIterator<Item = $t>
    };
}

/// Builds a bitflag set out of boolean conditions
///
/// Every `cond => FLAG` pair contributes `FLAG` when `cond` holds and the
/// empty set otherwise.
#[macro_export]
macro_rules! mk_bitflag {
    ($bool:expr => $flag:expr) => {
        if $bool {
            $flag
        } else {
            ::std::default::Default::default()
        }
    };

    ($($bool:expr => $flag:expr),+ $(,)?) => {
        $($crate::mk_bitflag!($bool => $flag))|+
    };
}
