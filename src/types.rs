//! Type system (C3).
//!
//! Types are immutable, interned, and compared by identity: `make_*`
//! entry points return a [`TypeId`] handle, and two requests with an
//! identical structural profile always return the same handle (§8,
//! "Type identity"). Base types are created once at table construction;
//! every other shape (qualified scalar, array, pointer) interns lazily
//! through [`InternTable`].

use crate::core::{Arena, InternTable};
use crate::decl::DeclId;
use crate::define_idx;
use crate::expr::ExprId;

define_idx!(pub struct TypeId);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BaseKind {
    Integer,
    Real,
    DoublePrecision,
    Complex,
    Character,
    Logical,
}

/// Position of a base kind on the numeric promotion ladder
/// (Integer → Real → Double → Complex). `None` for non-numeric kinds.
pub fn promotion_rank(kind: BaseKind) -> Option<u8> {
    match kind {
        BaseKind::Integer => Some(0),
        BaseKind::Real => Some(1),
        BaseKind::DoublePrecision => Some(2),
        BaseKind::Complex => Some(3),
        BaseKind::Character | BaseKind::Logical => None,
    }
}

/// The wider of two numeric kinds along the promotion ladder (§4.4).
/// Panics if either kind is non-numeric; callers check `is_numeric` first.
pub fn promote(a: BaseKind, b: BaseKind) -> BaseKind {
    let ra = promotion_rank(a).expect("promote called on a non-numeric kind");
    let rb = promotion_rank(b).expect("promote called on a non-numeric kind");
    if ra >= rb { a } else { b }
}

pub fn is_numeric(kind: BaseKind) -> bool {
    promotion_rank(kind).is_some()
}

/// Bundle of attributes carried by a qualifier bundle (§3). Attribute-less
/// bundles never exist: `TypeTable::make_qualified` collapses them to the
/// bare base type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct AttributeFlags(u16);

impl AttributeFlags {
    pub const NONE: Self = Self(0);
    pub const PARAMETER: Self = Self(1 << 0);
    pub const INTENT_IN: Self = Self(1 << 1);
    pub const INTENT_OUT: Self = Self(1 << 2);
    pub const INTENT_INOUT: Self = Self(1 << 3);
    pub const ASYNCHRONOUS: Self = Self(1 << 4);
    pub const EXTERNAL: Self = Self(1 << 5);
    pub const INTRINSIC: Self = Self(1 << 6);
    pub const VOLATILE: Self = Self(1 << 7);
    pub const DIMENSION: Self = Self(1 << 8);
    pub const ARGUMENT: Self = Self(1 << 9);

    pub fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    pub fn insert(&mut self, other: Self) {
        self.0 |= other.0;
    }

    pub fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl std::ops::BitOr for AttributeFlags {
    type Output = Self;
    fn bitor(self, rhs: Self) -> Self {
        self.union(rhs)
    }
}

/// One array dimension. `lower` defaults to `1` when absent on an explicit
/// dimension (§3 array wrapper: "explicit/assumed/deferred shape").
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DimSpec {
    Explicit { lower: Option<ExprId>, upper: ExprId },
    AssumedShape { lower: Option<ExprId> },
    Deferred,
    AssumedSize { lower: Option<ExprId> },
    ImpliedShape { lower: Option<ExprId> },
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QualifiedType {
    pub base: BaseKind,
    pub kind: Option<ExprId>,
    pub length: Option<ExprId>,
    pub attrs: AttributeFlags,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ArrayType {
    pub element: TypeId,
    pub dims: Vec<DimSpec>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PointerType {
    pub pointee: TypeId,
    pub rank: u32,
}

/// The structural profile a type is interned by; cloning one *is*
/// constructing the profile, so `TypeKind` doubles as its own dedup key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeKind {
    Base(BaseKind),
    Record(DeclId),
    Qualified(QualifiedType),
    Array(ArrayType),
    Pointer(PointerType),
    /// Untyped (BOZ) sentinel (§3, §4.4). Never constructed through
    /// interning; there is exactly one instance, held by `TypeTable`.
    BozSentinel,
}

pub struct TypeTable {
    arena: Arena<TypeId, TypeKind>,
    interned: InternTable<TypeKind, TypeId>,
    bases: [TypeId; 6],
    boz_sentinel: TypeId,
}

fn base_slot(kind: BaseKind) -> usize {
    match kind {
        BaseKind::Integer => 0,
        BaseKind::Real => 1,
        BaseKind::DoublePrecision => 2,
        BaseKind::Complex => 3,
        BaseKind::Character => 4,
        BaseKind::Logical => 5,
    }
}

impl TypeTable {
    pub fn new() -> Self {
        let mut arena = Arena::new();
        let mut bases = [TypeId::new(0); 6];
        for kind in [
            BaseKind::Integer,
            BaseKind::Real,
            BaseKind::DoublePrecision,
            BaseKind::Complex,
            BaseKind::Character,
            BaseKind::Logical,
        ] {
            bases[base_slot(kind)] = arena.alloc(TypeKind::Base(kind));
        }
        let boz_sentinel = arena.alloc(TypeKind::BozSentinel);
        Self {
            arena,
            interned: InternTable::new(),
            bases,
            boz_sentinel,
        }
    }

    pub fn base(&self, kind: BaseKind) -> TypeId {
        self.bases[base_slot(kind)]
    }

    pub fn boz_sentinel(&self) -> TypeId {
        self.boz_sentinel
    }

    pub fn is_boz_sentinel(&self, id: TypeId) -> bool {
        matches!(self.kind(id), TypeKind::BozSentinel)
    }

    pub fn kind(&self, id: TypeId) -> &TypeKind {
        self.arena.get(id)
    }

    pub fn base_kind_of(&self, id: TypeId) -> Option<BaseKind> {
        match self.kind(id) {
            TypeKind::Base(b) => Some(*b),
            TypeKind::Qualified(q) => Some(q.base),
            _ => None,
        }
    }

    pub fn make_qualified(
        &mut self,
        base: BaseKind,
        kind: Option<ExprId>,
        length: Option<ExprId>,
        attrs: AttributeFlags,
    ) -> TypeId {
        if kind.is_none() && length.is_none() && attrs.is_empty() {
            return self.base(base);
        }
        let profile = TypeKind::Qualified(QualifiedType {
            base,
            kind,
            length,
            attrs,
        });
        let Self { arena, interned, .. } = self;
        interned.insert_or_find(profile.clone(), || arena.alloc(profile))
    }

    pub fn make_character(&mut self, length: Option<ExprId>, kind: Option<ExprId>) -> TypeId {
        self.make_qualified(BaseKind::Character, kind, length, AttributeFlags::NONE)
    }

    pub fn make_array(&mut self, element: TypeId, dims: Vec<DimSpec>) -> TypeId {
        let profile = TypeKind::Array(ArrayType { element, dims });
        let Self { arena, interned, .. } = self;
        interned.insert_or_find(profile.clone(), || arena.alloc(profile))
    }

    pub fn make_pointer(&mut self, pointee: TypeId, rank: u32) -> TypeId {
        let profile = TypeKind::Pointer(PointerType { pointee, rank });
        let Self { arena, interned, .. } = self;
        interned.insert_or_find(profile.clone(), || arena.alloc(profile))
    }

    pub fn make_record(&mut self, decl: DeclId) -> TypeId {
        let profile = TypeKind::Record(decl);
        let Self { arena, interned, .. } = self;
        interned.insert_or_find(profile.clone(), || arena.alloc(profile))
    }
}

impl Default for TypeTable {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn base_types_are_singletons() {
        let table = TypeTable::new();
        assert_eq!(table.base(BaseKind::Integer), table.base(BaseKind::Integer));
        assert_ne!(table.base(BaseKind::Integer), table.base(BaseKind::Real));
    }

    #[test]
    fn make_qualified_with_no_attrs_collapses_to_base() {
        let mut table = TypeTable::new();
        let t = table.make_qualified(BaseKind::Integer, None, None, AttributeFlags::NONE);
        assert_eq!(t, table.base(BaseKind::Integer));
    }

    #[test]
    fn make_qualified_interns_by_structural_profile() {
        let mut table = TypeTable::new();
        let a = table.make_qualified(BaseKind::Integer, None, None, AttributeFlags::PARAMETER);
        let b = table.make_qualified(BaseKind::Integer, None, None, AttributeFlags::PARAMETER);
        assert_eq!(a, b);
        let c = table.make_qualified(BaseKind::Integer, None, None, AttributeFlags::EXTERNAL);
        assert_ne!(a, c);
    }

    #[test]
    fn make_array_interns_by_element_and_dims() {
        let mut table = TypeTable::new();
        let elem = table.base(BaseKind::Real);
        let a = table.make_array(elem, vec![DimSpec::Deferred]);
        let b = table.make_array(elem, vec![DimSpec::Deferred]);
        assert_eq!(a, b);
        let c = table.make_array(elem, vec![DimSpec::Deferred, DimSpec::Deferred]);
        assert_ne!(a, c);
    }

    #[rstest]
    #[case(BaseKind::Integer, BaseKind::Real, BaseKind::Real)]
    #[case(BaseKind::Real, BaseKind::DoublePrecision, BaseKind::DoublePrecision)]
    #[case(BaseKind::DoublePrecision, BaseKind::Complex, BaseKind::Complex)]
    #[case(BaseKind::Integer, BaseKind::Integer, BaseKind::Integer)]
    fn promotion_ladder(#[case] a: BaseKind, #[case] b: BaseKind, #[case] expected: BaseKind) {
        assert_eq!(promote(a, b), expected);
        assert_eq!(promote(b, a), expected);
    }

    #[test]
    fn boz_sentinel_is_not_a_base_or_qualified_type() {
        let table = TypeTable::new();
        assert!(table.is_boz_sentinel(table.boz_sentinel()));
        assert!(!table.is_boz_sentinel(table.base(BaseKind::Integer)));
    }
}
