/// Results delivered to a promisified callback.
///
/// A single result is passed through as `One`; zero or several results are
/// kept in order as `Many`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Arity<V> {
    One(V),
    Many(Vec<V>),
}

impl<V> Arity<V> {
    pub fn from_results(mut results: Vec<V>) -> Arity<V> {
        if results.len() == 1 {
            if let Some(v) = results.pop() {
                return Arity::One(v);
            }
        }
        Arity::Many(results)
    }

    #[inline]
    pub fn is_one(&self) -> bool {
        match self {
            Arity::One(_) => true,
            _ => false,
        }
    }

    #[inline]
    pub fn is_many(&self) -> bool {
        match self {
            Arity::Many(_) => true,
            _ => false,
        }
    }

    #[inline]
    pub fn one(self) -> Option<V> {
        match self {
            Arity::One(v) => Some(v),
            Arity::Many(_) => None,
        }
    }

    #[inline]
    pub fn into_vec(self) -> Vec<V> {
        match self {
            Arity::One(v) => vec![v],
            Arity::Many(vs) => vs,
        }
    }

    pub fn map<U, F>(self, mut op: F) -> Arity<U>
    where
        F: FnMut(V) -> U,
    {
        match self {
            Arity::One(v) => Arity::One(op(v)),
            Arity::Many(vs) => Arity::Many(vs.into_iter().map(op).collect()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arity() {
        let one = Arity::from_results(vec![1]);
        let many = Arity::from_results(vec![1, 2, 3]);
        let none = Arity::<i32>::from_results(vec![]);
        assert!(one.is_one());
        assert_eq!(one, Arity::One(1));
        assert!(many.is_many());
        assert_eq!(many, Arity::Many(vec![1, 2, 3]));
        assert_eq!(none, Arity::Many(vec![]));
        let one = one.map(|i| i * 10);
        let many = many.map(|i| i * 10);
        assert_eq!(one.clone().one(), Some(10));
        assert_eq!(many.clone().one(), None);
        assert_eq!(one.into_vec(), vec![10]);
        assert_eq!(many.into_vec(), vec![10, 20, 30]);
    }
}
