/// Width of one indentation level, in spaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Indent(u8);

impl Indent {
    /// 2-space indentation, the TypeScript default.
    pub const TYPESCRIPT: Self = Self(2);

    pub fn as_str(&self) -> &'static str {
        &"        "[..usize::from(self.0)]
    }
}

impl Default for Indent {
    fn default() -> Self {
        Self::TYPESCRIPT
    }
}
