use super::Formatter;

use automodel_core::schema::ModelName;

macro_rules! fmt {
    ($f:expr, $( $fragments:expr ),* $(,)?) => {{
        $(
            $fragments.to_python($f);
        )*
    }};
}

pub(super) trait ToPython {
    fn to_python(self, f: &mut Formatter<'_>);
}

impl ToPython for &str {
    fn to_python(self, f: &mut Formatter<'_>) {
        f.dst.push_str(self);
    }
}

impl ToPython for &String {
    fn to_python(self, f: &mut Formatter<'_>) {
        f.dst.push_str(self);
    }
}

impl ToPython for String {
    fn to_python(self, f: &mut Formatter<'_>) {
        f.dst.push_str(&self);
    }
}

impl ToPython for &ModelName {
    fn to_python(self, f: &mut Formatter<'_>) {
        f.dst.push_str(self.as_str());
    }
}
