//! Domain records to wire representations.

use actix_web::HttpResponse;
use actix_web::http::header;

use blog_core::domain::{
    Category, CommentInput, CommentRecord, Location, PostInput, PostRecord, ProfileInput,
    Redirect, User,
};
use blog_core::pagination::Page;
use blog_shared::RedirectResponse;
use blog_shared::dto::{
    CategoryResponse, CommentRequest, CommentResponse, LocationResponse, PageResponse,
    PostRequest, PostResponse, ProfileRequest, UserResponse,
};

/// 302 to the canonical path of `target`, echoing the path in the body.
pub fn redirect(target: &Redirect, login_url: &str) -> HttpResponse {
    let location = target.path(login_url);
    tracing::debug!(%location, "Redirecting");

    HttpResponse::Found()
        .insert_header((header::LOCATION, location.clone()))
        .json(RedirectResponse { location })
}

pub fn post_input(req: PostRequest) -> PostInput {
    PostInput {
        title: req.title,
        text: req.text,
        pub_date: req.pub_date,
        category_id: req.category_id,
        location_id: req.location_id,
        image: req.image,
        is_published: req.is_published.unwrap_or(true),
    }
}

pub fn comment_input(req: CommentRequest) -> CommentInput {
    CommentInput::new(req.text)
}

pub fn profile_input(req: ProfileRequest) -> ProfileInput {
    ProfileInput {
        username: req.username,
        first_name: req.first_name,
        last_name: req.last_name,
        email: req.email,
    }
}

pub fn user(user: &User) -> UserResponse {
    UserResponse {
        id: user.id,
        username: user.username.clone(),
        first_name: user.first_name.clone(),
        last_name: user.last_name.clone(),
    }
}

pub fn category(category: &Category) -> CategoryResponse {
    CategoryResponse {
        title: category.title.clone(),
        description: category.description.clone(),
        slug: category.slug.clone(),
    }
}

fn location(location: &Location) -> LocationResponse {
    LocationResponse {
        name: location.name.clone(),
    }
}

pub fn post(record: PostRecord) -> PostResponse {
    let relations = record.relations.unwrap_or_default();
    let post = record.post;

    PostResponse {
        id: post.id,
        title: post.title,
        text: post.text,
        pub_date: post.pub_date,
        author: relations.author.as_ref().map(user),
        category: relations.category.as_ref().map(category),
        location: relations.location.as_ref().map(location),
        image: post.image,
        is_published: post.is_published,
        comment_count: record.comment_count,
    }
}

pub fn comment(record: CommentRecord) -> CommentResponse {
    CommentResponse {
        id: record.comment.id,
        text: record.comment.text,
        author: record.author.as_ref().map(user),
        created_at: record.comment.created_at,
    }
}

pub fn page(page: Page<PostRecord>) -> PageResponse<PostResponse> {
    let next = page.next_page_number();
    let previous = page.previous_page_number();
    let page = page.map(post);

    PageResponse {
        results: page.items,
        page: page.number,
        num_pages: page.num_pages,
        count: page.total_count,
        next,
        previous,
    }
}
