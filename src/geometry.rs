//! Geometric utility objects for the y–z plane.

use crate::num::{all_finite, BFloat};
use std::{
    fmt,
    ops::{Add, Div, Index, IndexMut, Mul, Sub},
};

#[cfg(feature = "serialization")]
use serde::Serialize;

#[cfg(any(test, feature = "for-testing"))]
use approx::{AbsDiffEq, RelativeEq};

/// Denotes the transverse (y) or longitudinal (z) dimension.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Dim2 {
    Y = 0,
    Z = 1,
}

impl Dim2 {
    /// Creates an array for iterating over the y- and z-dimensions.
    pub fn slice() -> [Self; 2] {
        [Self::Y, Self::Z]
    }

    /// Returns the number of the dimension.
    pub fn num(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Dim2 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Self::Y => "y",
                Self::Z => "z",
            }
        )
    }
}

use Dim2::{Y, Z};

/// Represents any quantity with two dimensional components.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize))]
pub struct In2D<T>([T; 2]);

impl<T> In2D<T> {
    /// Creates a new 2D quantity given the two components.
    pub fn new(y: T, z: T) -> Self {
        Self([y, z])
    }

    /// Creates a new 2D quantity by evaluating the given component
    /// constructor for each dimension.
    pub fn with_each_component<C>(create_component: C) -> Self
    where
        C: Fn(Dim2) -> T,
    {
        Self::new(create_component(Y), create_component(Z))
    }

    /// Creates a new tuple containing copies of the two components.
    pub fn to_tuple(&self) -> (T, T)
    where
        T: Copy,
    {
        (self[Y], self[Z])
    }
}

impl<T> Index<Dim2> for In2D<T> {
    type Output = T;
    fn index(&self, dim: Dim2) -> &Self::Output {
        &self.0[dim as usize]
    }
}

impl<T> IndexMut<Dim2> for In2D<T> {
    fn index_mut(&mut self, dim: Dim2) -> &mut Self::Output {
        &mut self.0[dim as usize]
    }
}

impl<'a, T> IntoIterator for &'a In2D<T> {
    type Item = &'a T;
    type IntoIter = ::std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl<T: fmt::Display> fmt::Display for In2D<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        fmt::Display::fmt(&self[Y], f)?;
        f.write_str(", ")?;
        fmt::Display::fmt(&self[Z], f)?;
        f.write_str("]")
    }
}

#[cfg(any(test, feature = "for-testing"))]
impl<T> AbsDiffEq for In2D<T>
where
    T: AbsDiffEq,
    T::Epsilon: Copy,
{
    type Epsilon = <T as AbsDiffEq>::Epsilon;

    fn default_epsilon() -> Self::Epsilon {
        T::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: Self::Epsilon) -> bool {
        T::abs_diff_eq(&self[Y], &other[Y], epsilon) && T::abs_diff_eq(&self[Z], &other[Z], epsilon)
    }
}

#[cfg(any(test, feature = "for-testing"))]
impl<T> RelativeEq for In2D<T>
where
    T: RelativeEq,
    T::Epsilon: Copy,
{
    fn default_max_relative() -> Self::Epsilon {
        T::default_max_relative()
    }

    fn relative_eq(
        &self,
        other: &Self,
        epsilon: Self::Epsilon,
        max_relative: Self::Epsilon,
    ) -> bool {
        T::relative_eq(&self[Y], &other[Y], epsilon, max_relative)
            && T::relative_eq(&self[Z], &other[Z], epsilon, max_relative)
    }
}

#[cfg(any(test, feature = "for-testing"))]
macro_rules! impl_abs_diff_eq_2d {
    ($T:ident <$F:ident>) => {
        impl<$F> AbsDiffEq for $T<$F>
        where
            $F: BFloat + AbsDiffEq,
            $F::Epsilon: Copy,
        {
            type Epsilon = <In2D<$F> as AbsDiffEq>::Epsilon;

            fn default_epsilon() -> Self::Epsilon {
                In2D::<$F>::default_epsilon()
            }

            fn abs_diff_eq(&self, other: &Self, epsilon: Self::Epsilon) -> bool {
                In2D::<$F>::abs_diff_eq(&self.0, &other.0, epsilon)
            }
        }
    };
}

#[cfg(any(test, feature = "for-testing"))]
macro_rules! impl_relative_eq_2d {
    ($T:ident <$F:ident>) => {
        impl<$F> RelativeEq for $T<$F>
        where
            $F: BFloat + RelativeEq,
            $F::Epsilon: Copy,
        {
            fn default_max_relative() -> Self::Epsilon {
                In2D::<$F>::default_max_relative()
            }

            fn relative_eq(
                &self,
                other: &Self,
                epsilon: Self::Epsilon,
                max_relative: Self::Epsilon,
            ) -> bool {
                In2D::<$F>::relative_eq(&self.0, &other.0, epsilon, max_relative)
            }
        }
    };
}

/// A 2D vector in the y–z plane.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize))]
pub struct Vec2<F>(In2D<F>);

impl<F: BFloat> Vec2<F> {
    /// Creates a new 2D vector given the two components.
    pub fn new(y: F, z: F) -> Self {
        Self(In2D::new(y, z))
    }

    /// Creates a new zero vector.
    pub fn zero() -> Self {
        Self::new(F::zero(), F::zero())
    }

    /// Returns the y-component.
    pub fn y(&self) -> F {
        self[Y]
    }

    /// Returns the z-component.
    pub fn z(&self) -> F {
        self[Z]
    }

    /// Multiplies both components by the given factor.
    pub fn scale(&mut self, factor: F) {
        self[Y] = self[Y] * factor;
        self[Z] = self[Z] * factor;
    }

    /// Adds the given value to both components.
    pub fn translate(&mut self, offset: F) {
        self[Y] = self[Y] + offset;
        self[Z] = self[Z] + offset;
    }

    /// Multiplies each component by the corresponding component of the given vector.
    pub fn multiply_elementwise(&mut self, other: &Self) {
        self[Y] = self[Y] * other[Y];
        self[Z] = self[Z] * other[Z];
    }

    /// Adds each component of the given vector to the corresponding component.
    pub fn add_elementwise(&mut self, other: &Self) {
        self[Y] = self[Y] + other[Y];
        self[Z] = self[Z] + other[Z];
    }

    /// Computes the squared length of the vector.
    pub fn squared_length(&self) -> F {
        self[Y] * self[Y] + self[Z] * self[Z]
    }

    /// Computes the length of the vector.
    pub fn length(&self) -> F {
        self.squared_length().sqrt()
    }

    /// Computes the Euclidean distance to the given vector.
    pub fn distance_to(&self, other: &Self) -> F {
        (self - other).length()
    }

    /// Whether both components are finite.
    pub fn is_finite(&self) -> bool {
        all_finite(&self.0 .0)
    }
}

impl<F: BFloat> Index<Dim2> for Vec2<F> {
    type Output = F;
    fn index(&self, dim: Dim2) -> &Self::Output {
        &self.0[dim]
    }
}

impl<F: BFloat> IndexMut<Dim2> for Vec2<F> {
    fn index_mut(&mut self, dim: Dim2) -> &mut Self::Output {
        &mut self.0[dim]
    }
}

impl<'a, F: BFloat> Add<&'a Vec2<F>> for &'a Vec2<F> {
    type Output = Vec2<F>;
    fn add(self, other: Self) -> Self::Output {
        Self::Output::new(self[Y] + other[Y], self[Z] + other[Z])
    }
}

impl<F: BFloat> Add<Vec2<F>> for &Vec2<F> {
    type Output = Vec2<F>;
    fn add(self, other: Vec2<F>) -> Self::Output {
        self + &other
    }
}

impl<F: BFloat> Add<Vec2<F>> for Vec2<F> {
    type Output = Self;
    fn add(self, other: Self) -> Self::Output {
        &self + &other
    }
}

impl<F: BFloat> Add<&Vec2<F>> for Vec2<F> {
    type Output = Self;
    fn add(self, other: &Self) -> Self::Output {
        &self + other
    }
}

impl<'a, F: BFloat> Sub<&'a Vec2<F>> for &'a Vec2<F> {
    type Output = Vec2<F>;
    fn sub(self, other: Self) -> Self::Output {
        Self::Output::new(self[Y] - other[Y], self[Z] - other[Z])
    }
}

impl<F: BFloat> Sub<Vec2<F>> for Vec2<F> {
    type Output = Self;
    fn sub(self, other: Self) -> Self::Output {
        &self - &other
    }
}

impl<F: BFloat> Mul<F> for &Vec2<F> {
    type Output = Vec2<F>;
    fn mul(self, factor: F) -> Self::Output {
        Self::Output::new(factor * self[Y], factor * self[Z])
    }
}

impl<F: BFloat> Mul<F> for Vec2<F> {
    type Output = Self;
    fn mul(mut self, factor: F) -> Self::Output {
        self.scale(factor);
        self
    }
}

impl<F: BFloat> Div<F> for &Vec2<F> {
    type Output = Vec2<F>;
    fn div(self, divisor: F) -> Self::Output {
        #![allow(clippy::suspicious_arithmetic_impl)]
        let factor = divisor.recip();
        self * factor
    }
}

impl<F: BFloat> Div<F> for Vec2<F> {
    type Output = Self;
    fn div(self, divisor: F) -> Self::Output {
        &self / divisor
    }
}

impl<'a, F: BFloat> IntoIterator for &'a Vec2<F> {
    type Item = <&'a In2D<F> as IntoIterator>::Item;
    type IntoIter = <&'a In2D<F> as IntoIterator>::IntoIter;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<F: BFloat> fmt::Display for Vec2<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("(")?;
        fmt::Display::fmt(&self[Y], f)?;
        f.write_str(", ")?;
        fmt::Display::fmt(&self[Z], f)?;
        f.write_str(")")
    }
}

#[cfg(any(test, feature = "for-testing"))]
impl_abs_diff_eq_2d!(Vec2<F>);

#[cfg(any(test, feature = "for-testing"))]
impl_relative_eq_2d!(Vec2<F>);
