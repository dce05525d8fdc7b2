use super::{Formatter, ToPython};

/// Comma delimited
pub(super) struct Comma<L>(pub(super) L);

impl<L> ToPython for Comma<L>
where
    L: IntoIterator,
    L::Item: ToPython,
{
    fn to_python(self, f: &mut Formatter<'_>) {
        let mut s = "";
        for i in self.0 {
            fmt!(f, s, i);
            s = ", ";
        }
    }
}
