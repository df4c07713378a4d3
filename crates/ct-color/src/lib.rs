// SPDX-License-Identifier: MIT
//
// ct-color — the value layer underneath chromatext.
//
// Everything here is plain data: a clamped 24-bit RGB color, the fixed
// 16-entry legacy palette with its nearest-entry quantizer, the five
// format flags, and the named-color lookup that the markup layer treats
// as an external collaborator. No scanning, no regexes, no allocation
// beyond the textual encodings of a color.

pub mod color;
pub mod format;
pub mod names;
pub mod palette;

pub use color::{Color, MARKER};
pub use format::{Format, RESET};
pub use names::{ColorNames, NamedColors, NoNames};
pub use palette::CodedColor;
