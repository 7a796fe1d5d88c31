use std::fmt::Display;

/// Write anything [Display] into either a [std::fmt::Write] or an [std::io::Write]
pub trait MyWriteTo {
    fn write_to_fmt<U: std::fmt::Write>(&self, f: &mut U) -> std::fmt::Result;
    fn write_to_io<U: std::io::Write>(&self, f: &mut U) -> std::io::Result<()>;

    /// Same as [MyWriteTo::write_to_io] with a trailing newline
    fn writeln_to_io<U: std::io::Write>(&self, f: &mut U) -> std::io::Result<()> {
        self.write_to_io(f)?;
        writeln!(f)?;
        f.flush()
    }
}

impl<T> MyWriteTo for T
where
    T: Display + ?Sized,
{
    fn write_to_fmt<U: std::fmt::Write>(&self, f: &mut U) -> std::fmt::Result {
        write!(f, "{self}")
    }

    fn write_to_io<U: std::io::Write>(&self, f: &mut U) -> std::io::Result<()> {
        write!(f, "{self}")?;
        f.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::MyWriteTo;

    #[test]
    fn writes_display() {
        let mut s = String::new();
        42.write_to_fmt(&mut s).unwrap();
        assert_eq!(s, "42");

        let mut buf = Vec::new();
        "clause".writeln_to_io(&mut buf).unwrap();
        assert_eq!(buf, b"clause\n");
    }
}
