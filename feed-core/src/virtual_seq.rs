//! Виртуальная последовательность поверх набора страниц.
//!
//! [`VirtualSeq`] показывает упорядоченный набор страниц `&[Vec<T>]` как одну
//! непрерывную последовательность с доступом по индексу, не копируя элементы
//! в общий буфер. Страницы только дописываются в конец, поэтому индекс
//! элемента, однажды загруженного, больше не меняется.

use std::fmt;
use std::iter::FusedIterator;
use std::ops::Index;

/// Логическое представление страниц как одной последовательности.
///
/// Хранит ссылку на страницы и пару смещений `start`/`end`. Сумма длин
/// страниц считается один раз при создании представления.
pub struct VirtualSeq<'a, T> {
    pages: &'a [Vec<T>],
    start: usize,
    end: Option<usize>,
    total: usize,
}

impl<'a, T> VirtualSeq<'a, T> {
    /// Представление всех страниц целиком.
    pub fn new(pages: &'a [Vec<T>]) -> Self {
        Self::with_bounds(pages, 0, None)
    }

    /// Представление с границами в координатах сплющенной последовательности.
    ///
    /// Без `end` длина равна `сумма длин - start`, с `end` равна `end - start`.
    pub fn with_bounds(pages: &'a [Vec<T>], start: usize, end: Option<usize>) -> Self {
        let total = pages.iter().map(Vec::len).sum();
        Self {
            pages,
            start,
            end,
            total,
        }
    }

    /// Логическая длина представления.
    ///
    /// Верхняя граница `end` может выходить за уже загруженные данные:
    /// такие индексы считаются частью длины, но [`get`](Self::get) для них
    /// возвращает `None`.
    pub fn len(&self) -> usize {
        match self.end {
            Some(end) => end.saturating_sub(self.start),
            None => self.total.saturating_sub(self.start),
        }
    }

    /// `true`, если логическая длина равна нулю.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Элемент по логическому индексу или `None`, если он за пределами
    /// загруженных данных.
    pub fn get(&self, index: usize) -> Option<&'a T> {
        if index >= self.len() {
            return None;
        }
        let (page, offset) = self.locate(index)?;
        self.pages.get(page)?.get(offset)
    }

    /// Есть ли элемент с таким логическим индексом.
    pub fn has(&self, index: usize) -> bool {
        index < self.len() && self.locate(index).is_some()
    }

    /// Новое представление над теми же страницами, индексы `start`/`end`
    /// отсчитываются от начала текущего представления.
    ///
    /// Границы дочернего представления не выходят за границы текущего.
    pub fn slice(&self, start: usize, end: Option<usize>) -> VirtualSeq<'a, T> {
        let parent_end = self.start.saturating_add(self.len());
        let child_start = self.start.saturating_add(start).min(parent_end);
        let child_end = match end {
            Some(end) => Some(self.start.saturating_add(end).clamp(child_start, parent_end)),
            None => self.end,
        };

        VirtualSeq {
            pages: self.pages,
            start: child_start,
            end: child_end,
            total: self.total,
        }
    }

    /// Первый элемент.
    pub fn first(&self) -> Option<&'a T> {
        self.get(0)
    }

    /// Последний загруженный элемент.
    pub fn last(&self) -> Option<&'a T> {
        let loaded = self.loaded_len();
        loaded.checked_sub(1).and_then(|index| self.get(index))
    }

    /// Итератор по загруженным элементам представления.
    pub fn iter(&self) -> Iter<'a, T> {
        let remaining = self.loaded_len();
        let (page, offset) = self.locate(0).unwrap_or((self.pages.len(), 0));
        Iter {
            pages: self.pages,
            page,
            offset,
            remaining,
        }
    }

    /// Исходные страницы.
    pub fn pages(&self) -> &'a [Vec<T>] {
        self.pages
    }

    /// Сколько элементов представления реально загружено.
    fn loaded_len(&self) -> usize {
        self.len().min(self.total.saturating_sub(self.start))
    }

    /// Переводит логический индекс в пару `(страница, позиция в странице)`.
    fn locate(&self, index: usize) -> Option<(usize, usize)> {
        let mut remaining = index.checked_add(self.start)?;
        for (page_index, page) in self.pages.iter().enumerate() {
            if remaining < page.len() {
                return Some((page_index, remaining));
            }
            remaining -= page.len();
        }
        None
    }
}

impl<T> Clone for VirtualSeq<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for VirtualSeq<'_, T> {}

impl<T: fmt::Debug> fmt::Debug for VirtualSeq<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T> Index<usize> for VirtualSeq<'_, T> {
    type Output = T;

    fn index(&self, index: usize) -> &T {
        match self.get(index) {
            Some(item) => item,
            None => panic!(
                "index out of bounds: the len is {} but the index is {index}",
                self.len()
            ),
        }
    }
}

impl<'a, T> IntoIterator for VirtualSeq<'a, T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Iter<'a, T> {
        self.iter()
    }
}

impl<'a, T> IntoIterator for &VirtualSeq<'a, T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Iter<'a, T> {
        self.iter()
    }
}

/// Итератор по элементам [`VirtualSeq`] в порядке страниц.
pub struct Iter<'a, T> {
    pages: &'a [Vec<T>],
    page: usize,
    offset: usize,
    remaining: usize,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        if self.remaining == 0 {
            return None;
        }
        loop {
            let page = self.pages.get(self.page)?;
            if let Some(item) = page.get(self.offset) {
                self.offset += 1;
                self.remaining -= 1;
                return Some(item);
            }
            self.page += 1;
            self.offset = 0;
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

impl<T> FusedIterator for Iter<'_, T> {}
