//! Field flags (`/Ff`) of interactive form fields.
//!
//! Common flags live in [`FieldFlags`]; each field type adds its own set.
//! The written `/Ff` value is the union of both.

use bitflags::bitflags;

bitflags! {
    /// Flags shared by every field type.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct FieldFlags: u32 {
        /// Bit 1: the user cannot change the value
        const READ_ONLY = 1 << 0;
        /// Bit 2: the field must have a value before submit
        const REQUIRED = 1 << 1;
        /// Bit 3: not exported by submit-form actions
        const NO_EXPORT = 1 << 2;
    }
}

bitflags! {
    /// Text field flags (`/FT /Tx`).
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct TextFieldFlags: u32 {
        /// Bit 13: multiple lines
        const MULTILINE = 1 << 12;
        /// Bit 14: displayed as asterisks
        const PASSWORD = 1 << 13;
        /// Bit 21: value is a file path
        const FILE_SELECT = 1 << 20;
        /// Bit 23: no spell checking
        const DO_NOT_SPELL_CHECK = 1 << 22;
        /// Bit 24: no scrolling beyond the visible area
        const DO_NOT_SCROLL = 1 << 23;
    }
}

bitflags! {
    /// Button field flags (`/FT /Btn`).
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct ButtonFieldFlags: u32 {
        /// Bit 15: exactly one radio button is always on
        const NO_TOGGLE_TO_OFF = 1 << 14;
        /// Bit 16: radio button group
        const RADIO = 1 << 15;
        /// Bit 17: push button
        const PUSHBUTTON = 1 << 16;
    }
}

bitflags! {
    /// Choice field flags (`/FT /Ch`).
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct ChoiceFieldFlags: u32 {
        /// Bit 18: combo box rather than list box
        const COMBO = 1 << 17;
        /// Bit 19: the user may type a value
        const EDIT = 1 << 18;
        /// Bit 20: options are sorted
        const SORT = 1 << 19;
        /// Bit 22: several options may be selected
        const MULTI_SELECT = 1 << 21;
        /// Bit 23: no spell checking of typed text
        const DO_NOT_SPELL_CHECK = 1 << 22;
        /// Bit 27: commit as soon as the selection changes
        const COMMIT_ON_SEL_CHANGE = 1 << 26;
    }
}

impl Default for FieldFlags {
    fn default() -> Self {
        Self::empty()
    }
}

impl Default for TextFieldFlags {
    fn default() -> Self {
        Self::empty()
    }
}

impl Default for ButtonFieldFlags {
    fn default() -> Self {
        Self::empty()
    }
}

impl Default for ChoiceFieldFlags {
    fn default() -> Self {
        Self::empty()
    }
}

/// Horizontal alignment of variable text (`/Q`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextAlignment {
    /// Q=0, not written
    #[default]
    Left,
    /// Q=1
    Center,
    /// Q=2
    Right,
}

impl TextAlignment {
    /// Value of `/Q`.
    pub fn q_value(&self) -> i64 {
        match self {
            Self::Left => 0,
            Self::Center => 1,
            Self::Right => 2,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flag_bits() {
        assert_eq!(FieldFlags::READ_ONLY.bits(), 1);
        assert_eq!(FieldFlags::NO_EXPORT.bits(), 4);
        assert_eq!(TextFieldFlags::MULTILINE.bits(), 4096);
        assert_eq!(TextFieldFlags::DO_NOT_SCROLL.bits(), 1 << 23);
        assert_eq!(ButtonFieldFlags::RADIO.bits(), 32768);
        assert_eq!(ButtonFieldFlags::PUSHBUTTON.bits(), 65536);
        assert_eq!(ChoiceFieldFlags::COMBO.bits(), 131072);
        assert_eq!(ChoiceFieldFlags::COMMIT_ON_SEL_CHANGE.bits(), 1 << 26);
    }

    #[test]
    fn test_radio_group_flags() {
        let flags = ButtonFieldFlags::RADIO | ButtonFieldFlags::NO_TOGGLE_TO_OFF;
        assert_eq!(flags.bits(), 49152);
    }

    #[test]
    fn test_alignment() {
        assert_eq!(TextAlignment::default(), TextAlignment::Left);
        assert_eq!(TextAlignment::Center.q_value(), 1);
        assert_eq!(TextAlignment::Right.q_value(), 2);
    }
}
