//! SHEMAT namelist files (`.nml`/`.nlo`)
//!
//! SHEMAT input and output files are plain text, with each variable
//! introduced by a header line containing `#` and its data on the lines that
//! follow.
//!
//! ```text
//! # IDIM
//!        10
//! # GEOLOGY
//! 30*1 50*2 20*3
//! # PERM
//! 10*-1.00e-12 90*1.00e-14
//! ```
//!
//! Arrays are stored flat, `x` index fastest, and consecutive repeated values
//! are written as `count*value`. Negative values in `POR`, `PRES`, and `PERM`
//! mark Dirichlet boundary conditions (see [bc]).
//!
//! The owning type is [NamelistFile]. The supporting modules are exposed for
//! anyone wanting to work with the raw text directly.

pub mod bc;
mod file;
mod geometry;
mod index;
mod lexer;
mod rle;
mod xyz;

#[doc(inline)]
pub use file::NamelistFile;

#[doc(inline)]
pub use bc::{BoundaryConditions, BoundaryKind, CellValue};

#[doc(inline)]
pub use geometry::CellBoundaries;

#[doc(inline)]
pub use index::{header_matches, HeaderIndex};

#[doc(inline)]
pub use lexer::{Lexer, Token, MAX_RUN};

#[doc(inline)]
pub use rle::{decode, encode, Decoded, ValueFormat};

#[doc(inline)]
pub use xyz::{Axis, Dimensions, Xyz};
