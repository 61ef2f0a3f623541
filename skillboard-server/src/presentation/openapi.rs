use utoipa::OpenApi;

use crate::presentation::handlers::posts::{PostDto, PostPayloadDto, SuggestionDto};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::presentation::handlers::posts::list_posts,
        crate::presentation::handlers::posts::get_post,
        crate::presentation::handlers::posts::create_post,
        crate::presentation::handlers::posts::update_post,
        crate::presentation::handlers::posts::delete_post,
        crate::presentation::handlers::posts::search_posts,
        crate::presentation::handlers::posts::suggest_posts,
        crate::presentation::handlers::posts::posts_by_category
    ),
    components(
        schemas(
            PostPayloadDto,
            PostDto,
            SuggestionDto
        )
    ),
    tags(
        (name = "posts", description = "Skill request and offer posts")
    )
)]
pub(crate) struct ApiDoc;
