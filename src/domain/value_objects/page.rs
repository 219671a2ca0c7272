//! Pagination and sorting value objects.

use std::fmt;
use std::str::FromStr;

use crate::shared::error::AppError;

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    /// SQL keyword for this direction.
    pub fn as_sql(&self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }

    /// Apply the direction to an ascending ordering.
    pub fn apply(&self, ordering: std::cmp::Ordering) -> std::cmp::Ordering {
        match self {
            Self::Asc => ordering,
            Self::Desc => ordering.reverse(),
        }
    }
}

/// A property of an entity that listings can be sorted by.
pub trait SortField: Sized + Copy {
    /// Entity name used in error messages.
    const ENTITY: &'static str;

    /// Resolve a wire-format property name (e.g. `lastName`).
    fn from_property(property: &str) -> Option<Self>;

    /// Wire-format property name.
    fn property(&self) -> &'static str;
}

/// One sort term: a property, its direction and whether text compares
/// case-insensitively.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Order<F> {
    pub field: F,
    pub direction: SortDirection,
    pub ignore_case: bool,
}

impl<F: SortField> Order<F> {
    pub fn asc(field: F) -> Self {
        Self {
            field,
            direction: SortDirection::Asc,
            ignore_case: false,
        }
    }

    pub fn desc(field: F) -> Self {
        Self {
            field,
            direction: SortDirection::Desc,
            ignore_case: false,
        }
    }

    pub fn ignoring_case(self) -> Self {
        Self {
            ignore_case: true,
            ..self
        }
    }
}

/// Listing order: sort terms applied left to right.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sort<F> {
    orders: Vec<Order<F>>,
}

impl<F: SortField> Sort<F> {
    pub fn by(orders: Vec<Order<F>>) -> Self {
        Self { orders }
    }

    pub fn asc(field: F) -> Self {
        Self::by(vec![Order::asc(field)])
    }

    pub fn desc(field: F) -> Self {
        Self::by(vec![Order::desc(field)])
    }

    pub fn orders(&self) -> &[Order<F>] {
        &self.orders
    }

    pub fn is_unsorted(&self) -> bool {
        self.orders.is_empty()
    }

    /// Append the terms of `other` after this sort's own.
    pub fn and(mut self, other: Self) -> Self {
        self.orders.extend(other.orders);
        self
    }

    /// Combine repeated `sort` parameters, in the order given.
    pub fn parse_all<'a>(values: impl IntoIterator<Item = &'a str>) -> Result<Self, AppError> {
        values
            .into_iter()
            .try_fold(Self::by(Vec::new()), |sort, value| Ok(sort.and(value.parse()?)))
    }
}

/// Parses `property[,property...][,asc|desc][,ignorecase]`.
///
/// Every listed property takes the same direction. A value without any
/// property yields an unsorted result.
impl<F: SortField> FromStr for Sort<F> {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut elements: Vec<&str> = s.split(',').map(str::trim).collect();

        let ignore_case = elements
            .last()
            .is_some_and(|e| e.eq_ignore_ascii_case("ignorecase"));
        if ignore_case {
            elements.pop();
        }

        let direction = match elements.last() {
            Some(e) if e.eq_ignore_ascii_case("asc") => Some(SortDirection::Asc),
            Some(e) if e.eq_ignore_ascii_case("desc") => Some(SortDirection::Desc),
            _ => None,
        };
        if direction.is_some() {
            elements.pop();
        }

        elements
            .into_iter()
            .filter(|property| !property.is_empty())
            .map(|property| {
                let field = F::from_property(property).ok_or_else(|| {
                    AppError::BadRequest(format!(
                        "No property '{}' found for type '{}'",
                        property,
                        F::ENTITY
                    ))
                })?;
                Ok(Order {
                    field,
                    direction: direction.unwrap_or_default(),
                    ignore_case,
                })
            })
            .collect::<Result<Vec<_>, AppError>>()
            .map(Self::by)
    }
}

impl<F: SortField> fmt::Display for Order<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let direction = match self.direction {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        };
        write!(f, "{},{}", self.field.property(), direction)?;
        if self.ignore_case {
            f.write_str(",ignorecase")?;
        }
        Ok(())
    }
}

impl<F: SortField> fmt::Display for Sort<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, order) in self.orders.iter().enumerate() {
            if i > 0 {
                f.write_str(";")?;
            }
            write!(f, "{}", order)?;
        }
        Ok(())
    }
}

/// Requested page: zero-based page number, page size and ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest<S> {
    pub page: u32,
    pub size: u32,
    pub sort: S,
}

impl<S> PageRequest<S> {
    pub fn new(page: u32, size: u32, sort: S) -> Self {
        Self { page, size, sort }
    }

    /// Number of rows to skip.
    pub fn offset(&self) -> u64 {
        u64::from(self.page) * u64::from(self.size)
    }
}

/// A page of results plus the totals needed to navigate the rest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    pub content: Vec<T>,
    pub number: u32,
    pub size: u32,
    pub total_elements: u64,
}

impl<T> Page<T> {
    pub fn new(content: Vec<T>, number: u32, size: u32, total_elements: u64) -> Self {
        Self {
            content,
            number,
            size,
            total_elements,
        }
    }

    pub fn total_pages(&self) -> u64 {
        if self.size == 0 {
            return 1;
        }
        self.total_elements.div_ceil(u64::from(self.size))
    }

    pub fn is_first(&self) -> bool {
        self.number == 0
    }

    pub fn is_last(&self) -> bool {
        u64::from(self.number) + 1 >= self.total_pages()
    }

    /// Convert each element, keeping the page metadata.
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            content: self.content.into_iter().map(f).collect(),
            number: self.number,
            size: self.size,
            total_elements: self.total_elements,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Field {
        Name,
        Age,
    }

    impl SortField for Field {
        const ENTITY: &'static str = "Person";

        fn from_property(property: &str) -> Option<Self> {
            match property {
                "name" => Some(Self::Name),
                "age" => Some(Self::Age),
                _ => None,
            }
        }

        fn property(&self) -> &'static str {
            match self {
                Self::Name => "name",
                Self::Age => "age",
            }
        }
    }

    #[test_case("name" => Sort::asc(Field::Name); "property only")]
    #[test_case("name,asc" => Sort::asc(Field::Name); "explicit asc")]
    #[test_case("age,desc" => Sort::desc(Field::Age); "desc")]
    #[test_case("age,DESC" => Sort::desc(Field::Age); "upper case direction")]
    #[test_case("name," => Sort::asc(Field::Name); "trailing comma")]
    #[test_case("name,age,desc" => Sort::by(vec![Order::desc(Field::Name), Order::desc(Field::Age)]); "shared direction")]
    #[test_case("name,desc,IgnoreCase" => Sort::by(vec![Order::desc(Field::Name).ignoring_case()]); "ignore case")]
    #[test_case("name,ignorecase" => Sort::by(vec![Order::asc(Field::Name).ignoring_case()]); "ignore case without direction")]
    #[test_case("desc" => Sort::by(vec![]); "direction only")]
    fn test_parse_sort(input: &str) -> Sort<Field> {
        input.parse().unwrap()
    }

    #[test]
    fn test_parse_sort_unknown_property() {
        let err = "height,asc".parse::<Sort<Field>>().unwrap_err();
        assert_eq!(err.to_string(), "No property 'height' found for type 'Person'");
    }

    #[test]
    fn test_parse_sort_unknown_direction_is_a_property() {
        let err = "name,sideways".parse::<Sort<Field>>().unwrap_err();
        assert_eq!(err.to_string(), "No property 'sideways' found for type 'Person'");
    }

    #[test]
    fn test_parse_all_keeps_parameter_order() {
        let sort = Sort::<Field>::parse_all(["age,desc", "name"]).unwrap();
        assert_eq!(
            sort.orders(),
            &[Order::desc(Field::Age), Order::asc(Field::Name)]
        );

        assert!(Sort::<Field>::parse_all([]).unwrap().is_unsorted());
    }

    #[test]
    fn test_sort_display() {
        assert_eq!(Sort::desc(Field::Age).to_string(), "age,desc");
        let sort = Sort::by(vec![Order::asc(Field::Name).ignoring_case(), Order::desc(Field::Age)]);
        assert_eq!(sort.to_string(), "name,asc,ignorecase;age,desc");
    }

    #[test]
    fn test_page_request_offset() {
        assert_eq!(PageRequest::new(0, 10, ()).offset(), 0);
        assert_eq!(PageRequest::new(3, 25, ()).offset(), 75);
    }

    #[test]
    fn test_page_metadata() {
        let page = Page::new(vec![1, 2], 1, 2, 5);
        assert_eq!(page.total_pages(), 3);
        assert!(!page.is_first());
        assert!(!page.is_last());

        let last = Page::new(vec![5], 2, 2, 5);
        assert!(last.is_last());

        let empty: Page<i32> = Page::new(vec![], 0, 10, 0);
        assert_eq!(empty.total_pages(), 0);
        assert!(empty.is_first());
        assert!(empty.is_last());
    }

    #[test]
    fn test_page_map_keeps_metadata() {
        let page = Page::new(vec![1, 2], 0, 10, 2).map(|n| n * 10);
        assert_eq!(page.content, vec![10, 20]);
        assert_eq!(page.total_elements, 2);
    }
}
