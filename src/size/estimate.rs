//! Value Size Estimation
//!
//! Best-effort estimation of a value's in-memory footprint, used by the
//! cache for admission accounting. Estimates are advisory: they ignore
//! allocator overhead and shared substructure. Every supported type is an
//! owned tree, so the recursive implementations terminate structurally.

use std::mem::size_of;

// == Entry Size Trait ==
/// Types that can report an approximate byte size for admission accounting.
pub trait EntrySize {
    /// Returns the estimated payload size in bytes.
    fn estimated_size(&self) -> usize;
}

// == Scalar Implementations ==
macro_rules! impl_entry_size_scalar {
    ($($ty:ty),*) => {
        $(
            impl EntrySize for $ty {
                fn estimated_size(&self) -> usize {
                    size_of::<$ty>()
                }
            }
        )*
    };
}

impl_entry_size_scalar!(
    bool, char, u8, u16, u32, u64, usize, i8, i16, i32, i64, isize, f32, f64
);

// == String Implementations ==
impl EntrySize for String {
    fn estimated_size(&self) -> usize {
        self.len()
    }
}

impl EntrySize for &str {
    fn estimated_size(&self) -> usize {
        self.len()
    }
}

// == Container Implementations ==
impl<T: EntrySize> EntrySize for Vec<T> {
    fn estimated_size(&self) -> usize {
        self.iter().map(EntrySize::estimated_size).sum()
    }
}

impl<T: EntrySize> EntrySize for Option<T> {
    fn estimated_size(&self) -> usize {
        self.as_ref().map_or(0, EntrySize::estimated_size)
    }
}

// == JSON Implementation ==
/// Arrays and objects are summed recursively; object keys count toward the
/// total. `serde_json::Value` owns its children, so there are no cycles.
impl EntrySize for serde_json::Value {
    fn estimated_size(&self) -> usize {
        match self {
            serde_json::Value::Null => 0,
            serde_json::Value::Bool(_) => 1,
            serde_json::Value::Number(_) => size_of::<f64>(),
            serde_json::Value::String(s) => s.len(),
            serde_json::Value::Array(items) => {
                items.iter().map(EntrySize::estimated_size).sum()
            }
            serde_json::Value::Object(map) => map
                .iter()
                .map(|(key, value)| key.len() + value.estimated_size())
                .sum(),
        }
    }
}
