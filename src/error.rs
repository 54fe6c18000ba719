use core::fmt::{Debug, Formatter};

/// Error of a typed block read.
#[derive(Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ReadError<E> {
    /// Transport reported a failure
    Bus(E),
    /// Transport returned fewer bytes than requested
    ShortRead { expected: usize, actual: usize },
}

impl<E> Debug for ReadError<E>
where
    E: Debug,
{
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Bus(e) => f.debug_tuple("Bus").field(e).finish(),
            Self::ShortRead { expected, actual } => f
                .debug_struct("ShortRead")
                .field("expected", expected)
                .field("actual", actual)
                .finish(),
        }
    }
}
