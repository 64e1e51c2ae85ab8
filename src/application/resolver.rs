//! 引用解析器（population）
//!
//! 把记录里保存的引用标识展开为被引用记录本身。只读，绝不写存储。
//! 被引用记录缺失是读取期错误（`DanglingReference`），不会被悄悄
//! 置空。

use std::sync::Arc;

use crate::application::error::WorkflowError;
use crate::application::ports::{AuthorRepositoryPort, BookRepositoryPort, GenreRepositoryPort};
use crate::domain::catalog::{Author, Book, BookInstance, Genre};

/// 展开后的图书: author / genres 引用已替换为完整记录
#[derive(Debug, Clone)]
pub struct PopulatedBook {
    pub book: Book,
    pub author: Author,
    pub genres: Vec<Genre>,
}

/// 展开后的副本: book 引用已替换为完整记录
#[derive(Debug, Clone)]
pub struct PopulatedBookInstance {
    pub instance: BookInstance,
    pub book: Book,
}

/// 引用解析器
pub struct Resolver {
    authors: Arc<dyn AuthorRepositoryPort>,
    genres: Arc<dyn GenreRepositoryPort>,
    books: Arc<dyn BookRepositoryPort>,
}

impl Resolver {
    pub fn new(
        authors: Arc<dyn AuthorRepositoryPort>,
        genres: Arc<dyn GenreRepositoryPort>,
        books: Arc<dyn BookRepositoryPort>,
    ) -> Self {
        Self {
            authors,
            genres,
            books,
        }
    }

    /// 展开图书的 author 与 genres 引用。
    /// 两路读取相互独立，并发发起，任一失败整体失败。
    pub async fn populate_book(&self, book: Book) -> Result<PopulatedBook, WorkflowError> {
        let author_fut = async {
            self.authors
                .find_by_id(book.author)
                .await?
                .ok_or_else(|| WorkflowError::dangling("Author", *book.author.as_uuid()))
        };
        let genres_fut = async {
            let mut genres = Vec::with_capacity(book.genres.len());
            for genre_id in &book.genres {
                let genre = self
                    .genres
                    .find_by_id(*genre_id)
                    .await?
                    .ok_or_else(|| WorkflowError::dangling("Genre", *genre_id.as_uuid()))?;
                genres.push(genre);
            }
            Ok::<_, WorkflowError>(genres)
        };

        let (author, genres) = tokio::try_join!(author_fut, genres_fut)?;
        Ok(PopulatedBook {
            book,
            author,
            genres,
        })
    }

    /// 批量展开图书
    pub async fn populate_books(
        &self,
        books: Vec<Book>,
    ) -> Result<Vec<PopulatedBook>, WorkflowError> {
        let mut populated = Vec::with_capacity(books.len());
        for book in books {
            populated.push(self.populate_book(book).await?);
        }
        Ok(populated)
    }

    /// 展开副本的 book 引用
    pub async fn populate_book_instance(
        &self,
        instance: BookInstance,
    ) -> Result<PopulatedBookInstance, WorkflowError> {
        let book = self
            .books
            .find_by_id(instance.book)
            .await?
            .ok_or_else(|| WorkflowError::dangling("Book", *instance.book.as_uuid()))?;
        Ok(PopulatedBookInstance { instance, book })
    }

    /// 批量展开副本
    pub async fn populate_book_instances(
        &self,
        instances: Vec<BookInstance>,
    ) -> Result<Vec<PopulatedBookInstance>, WorkflowError> {
        let mut populated = Vec::with_capacity(instances.len());
        for instance in instances {
            populated.push(self.populate_book_instance(instance).await?);
        }
        Ok(populated)
    }
}
