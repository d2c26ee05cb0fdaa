//! # keybits
//!
//! Order-preserving bit-level codecs and tuple-key views for ordered
//! key-value stores.
//!
//! A [codec::Codec] turns a typed value into a bit sequence whose unsigned
//! byte-wise ordering matches the value's natural ordering, packing fields at
//! bit granularity (a bool costs one bit, a list element one continuation
//! bit). Codecs compose with [combinator::zip] into tuple keys, and a
//! [view::SubrangeView] scopes a cursor to every entry sharing one leading
//! field value, using the successor transform in [cursor::BitCursor] to turn
//! the shared prefix into a half-open byte range.
//!
//! The storage engine is an external collaborator behind [store::RawCursor];
//! [store::MemStore] is the bundled in-memory implementation.
//!
//! ## Example
//!
//! ```
//! use keybits::codec::U32Codec;
//! use keybits::combinator::zip;
//! use keybits::store::MemStore;
//! use keybits::string::Latin1Codec;
//! use keybits::typed::TypedCursor;
//! use keybits::view::SubrangeView;
//!
//! let mut store = MemStore::new();
//! let mut cursor =
//!     TypedCursor::new(store.cursor(), zip(U32Codec, U32Codec), Latin1Codec::new());
//! cursor.put(&(100, 0), &"first".to_string()).unwrap();
//! cursor.put(&(100, 2), &"second".to_string()).unwrap();
//! cursor.put(&(200, 7), &"other".to_string()).unwrap();
//! drop(cursor);
//!
//! let mut view =
//!     SubrangeView::new(store.cursor(), U32Codec, U32Codec, Latin1Codec::new(), 100).unwrap();
//! assert!(view.move_first());
//! assert_eq!((view.key(), view.value()), (0, "first".to_string()));
//! assert!(view.move_next());
//! assert_eq!(view.key(), 2);
//! assert!(!view.move_next());
//! ```

pub mod bits;
pub mod codec;
pub mod combinator;
pub mod cursor;
pub mod errors;
pub mod store;
pub mod string;
pub mod time;
pub mod typed;
pub mod view;
