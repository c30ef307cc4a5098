//! Built-in domain template.
//!
//! [`domain_template`] is the file set every new domain starts from: Go
//! handlers, model, repository, service, DTOs and errors, plus a
//! TypeScript client for the API. Paths and bodies use the
//! `{{PLACEHOLDER}}` variables of
//! [`RenderContext`](crudgen_core::domain::RenderContext).
//!
//! `models/index.ts`, `types/index.ts` and `tables/` are not part of the
//! template; the generators produce them after the files are written.

use crudgen_core::domain::DomainTemplate;

/// Directories created for every domain, relative to the domain root.
pub const DIRECTORIES: &[&str] = &["api", "models", "repo", "repo/db", "service", "types", "views"];

/// The template used by `crudgen new-domain`.
pub fn domain_template() -> DomainTemplate {
    let template = DIRECTORIES
        .iter()
        .fold(DomainTemplate::new(), |t, dir| t.directory(dir));

    template
        .file("api/{{DOMAIN}}.go", API_GO)
        .file("api/{{DOMAIN}}.ts", API_TS)
        .file("models/{{DOMAIN}}.go", MODELS_GO)
        .file("repo/{{DOMAIN}}.go", REPO_GO)
        .file("repo/db/{{DOMAIN}}.go", REPO_DB_GO)
        .file("service/{{DOMAIN}}.go", SERVICE_GO)
        .file("types/{{DOMAIN}}.go", TYPES_GO)
        .file("errors.go", ERRORS_GO)
}

/// HTTP handlers registered on the domain's API entry.
const API_GO: &str = r#"package api

import (
	"errors"
	"fmt"
	"strconv"

	domain "{{MODULE}}/domains/{{DOMAIN}}"
	"{{MODULE}}/domains/{{DOMAIN}}/service"
	"{{MODULE}}/domains/{{DOMAIN}}/types"
	"{{MODULE}}/server"
	"{{MODULE}}/server/auth"
	"github.com/gofiber/fiber/v2"
)

var {{DOMAIN_PASCAL}}Api = server.NewApiEntry("/{{DOMAIN_PLURAL}}", auth.UseAuth)

func init() {
	{{DOMAIN_PASCAL}}Api.Get("/", list{{DOMAIN_PASCAL_PLURAL}})
	{{DOMAIN_PASCAL}}Api.Get("/:id", get{{DOMAIN_PASCAL}})
	{{DOMAIN_PASCAL}}Api.Post("/", auth.RequireAuth, create{{DOMAIN_PASCAL}})
	{{DOMAIN_PASCAL}}Api.Patch("/:id", auth.RequireAuth, update{{DOMAIN_PASCAL}})
	{{DOMAIN_PASCAL}}Api.Delete("/:id", auth.RequireAuth, delete{{DOMAIN_PASCAL}})
}

func get{{DOMAIN_PASCAL}}(ctx *fiber.Ctx) error {
	id, err := strconv.ParseUint(ctx.Params("id"), 10, 32)
	if err != nil {
		return server.Error(ctx, 400, fmt.Errorf("invalid {{DOMAIN}} ID: %w", err))
	}

	{{DOMAIN_CAMEL}}, err := service.Get{{DOMAIN_PASCAL}}(ctx.UserContext(), uint(id))
	if errors.Is(err, domain.Err{{DOMAIN_PASCAL}}NotFound) {
		return server.Error(ctx, 404, domain.Err{{DOMAIN_PASCAL}}NotFound)
	} else if err != nil {
		return server.Error(ctx, 500, err)
	}

	return server.Success(ctx, {{DOMAIN_CAMEL}})
}

func list{{DOMAIN_PASCAL_PLURAL}}(ctx *fiber.Ctx) error {
	var query types.{{DOMAIN_PASCAL}}ListQuery
	if err := ctx.QueryParser(&query); err != nil {
		return server.Error(ctx, 400, fmt.Errorf("malformed query: %w", err))
	}

	result, err := service.List{{DOMAIN_PASCAL_PLURAL}}(ctx.UserContext(), query)
	if err != nil {
		return server.Error(ctx, 500, err)
	}

	return server.Success(ctx, result)
}

func create{{DOMAIN_PASCAL}}(ctx *fiber.Ctx) error {
	var data types.{{DOMAIN_PASCAL}}Create
	if err := ctx.BodyParser(&data); err != nil {
		return server.Error(ctx, 400, fmt.Errorf("malformed request body: %w", err))
	}

	{{DOMAIN_CAMEL}}, err := service.Create{{DOMAIN_PASCAL}}(ctx.UserContext(), &data)
	if err != nil {
		return server.Error(ctx, 500, err)
	}

	return server.Success(ctx, {{DOMAIN_CAMEL}})
}

func update{{DOMAIN_PASCAL}}(ctx *fiber.Ctx) error {
	id, err := strconv.ParseUint(ctx.Params("id"), 10, 32)
	if err != nil {
		return server.Error(ctx, 400, fmt.Errorf("invalid {{DOMAIN}} ID: %w", err))
	}

	var data types.{{DOMAIN_PASCAL}}Update
	if err := ctx.BodyParser(&data); err != nil {
		return server.Error(ctx, 400, fmt.Errorf("malformed request body: %w", err))
	}

	{{DOMAIN_CAMEL}}, err := service.Update{{DOMAIN_PASCAL}}(ctx.UserContext(), uint(id), &data)
	if err != nil {
		if errors.Is(err, domain.Err{{DOMAIN_PASCAL}}NotFound) {
			return server.Error(ctx, 404, domain.Err{{DOMAIN_PASCAL}}NotFound)
		}
		return server.Error(ctx, 500, err)
	}

	return server.Success(ctx, {{DOMAIN_CAMEL}})
}

func delete{{DOMAIN_PASCAL}}(ctx *fiber.Ctx) error {
	id, err := strconv.ParseUint(ctx.Params("id"), 10, 32)
	if err != nil {
		return server.Error(ctx, 400, fmt.Errorf("invalid {{DOMAIN}} ID: %w", err))
	}

	if err := service.Delete{{DOMAIN_PASCAL}}(ctx.UserContext(), uint(id)); err != nil {
		if errors.Is(err, domain.Err{{DOMAIN_PASCAL}}NotFound) {
			return server.Error(ctx, 404, domain.Err{{DOMAIN_PASCAL}}NotFound)
		}
		return server.Error(ctx, 500, err)
	}

	return server.Success[any](ctx, nil)
}
"#;

/// Client-side API calls mirroring the Go handlers.
const API_TS: &str = r#"import type { ApiResponse, PaginatedResult } from "@/common"
import { ApiEntry } from "@/client"
import type { {{DOMAIN_PASCAL}} } from "../models"
import type { {{DOMAIN_PASCAL}}Create, {{DOMAIN_PASCAL}}ListQuery, {{DOMAIN_PASCAL}}Update } from "../types"

const {{DOMAIN_CAMEL}}Api = new ApiEntry("/{{DOMAIN_PLURAL}}")

export async function get{{DOMAIN_PASCAL}}(id: number): ApiResponse<{{DOMAIN_PASCAL}}> {
    return await {{DOMAIN_CAMEL}}Api.get("/" + id)
}

export async function list{{DOMAIN_PASCAL_PLURAL}}(
    query: Partial<{{DOMAIN_PASCAL}}ListQuery>,
): ApiResponse<PaginatedResult<{{DOMAIN_PASCAL}}>> {
    return await {{DOMAIN_CAMEL}}Api.get("/", query)
}

export async function create{{DOMAIN_PASCAL}}(data: {{DOMAIN_PASCAL}}Create): ApiResponse<{{DOMAIN_PASCAL}}> {
    return await {{DOMAIN_CAMEL}}Api.post("/", null, data)
}

export async function update{{DOMAIN_PASCAL}}(id: number, data: {{DOMAIN_PASCAL}}Update): ApiResponse<{{DOMAIN_PASCAL}}> {
    return await {{DOMAIN_CAMEL}}Api.patch("/" + id, null, data)
}

export async function delete{{DOMAIN_PASCAL}}(id: number): ApiResponse<null> {
    return await {{DOMAIN_CAMEL}}Api.delete("/" + id)
}
"#;

/// GORM model.
const MODELS_GO: &str = r#"package models

import "time"

type {{DOMAIN_PASCAL}} struct {
	ID        uint      `json:"id" gorm:"primaryKey"`
	CreatedAt time.Time `json:"created_at"`
	UpdatedAt time.Time `json:"updated_at"`
	// Add your fields here
}

func (a *{{DOMAIN_PASCAL}}) TableName() string {
	return "{{DOMAIN_CAMEL}}"
}
"#;

/// Repository interface and its default binding.
const REPO_GO: &str = r#"package repo

import (
	"context"

	"{{MODULE}}/common"
	"{{MODULE}}/domains/{{DOMAIN}}/models"
	impl "{{MODULE}}/domains/{{DOMAIN}}/repo/db"
	"{{MODULE}}/domains/{{DOMAIN}}/types"
)

var {{DOMAIN_PASCAL}}Repo I{{DOMAIN_PASCAL}}Repo = &impl.{{DOMAIN_PASCAL}}Repo{}

type I{{DOMAIN_PASCAL}}Repo interface {
	Get(ctx context.Context, id uint) (*models.{{DOMAIN_PASCAL}}, error)
	List(ctx context.Context, query *types.{{DOMAIN_PASCAL}}ListQuery) (*common.PaginatedResult[models.{{DOMAIN_PASCAL}}], error)
	Create(ctx context.Context, data *types.{{DOMAIN_PASCAL}}Create) (*models.{{DOMAIN_PASCAL}}, error)
	Update(ctx context.Context, id uint, updates *types.{{DOMAIN_PASCAL}}Update) (*models.{{DOMAIN_PASCAL}}, error)
	Delete(ctx context.Context, id uint) error
}
"#;

/// GORM-backed repository implementation.
const REPO_DB_GO: &str = r#"package impl

import (
	"context"
	"errors"
	"fmt"
	"time"

	"{{MODULE}}/common"
	domain "{{MODULE}}/domains/{{DOMAIN}}"
	"{{MODULE}}/domains/{{DOMAIN}}/models"
	"{{MODULE}}/domains/{{DOMAIN}}/tables"
	"{{MODULE}}/domains/{{DOMAIN}}/types"
	"{{MODULE}}/server/db"
	"gorm.io/gorm"
	"gorm.io/gorm/clause"
)

type {{DOMAIN_PASCAL}}Repo struct{}

func (r *{{DOMAIN_PASCAL}}Repo) Get(ctx context.Context, id uint) (*models.{{DOMAIN_PASCAL}}, error) {
	conn, err := db.Default()
	if err != nil {
		return nil, db.ConnError(err)
	}

	{{DOMAIN_CAMEL}}, err := gorm.G[models.{{DOMAIN_PASCAL}}](conn).Where(tables.{{DOMAIN_PASCAL}}.ID.Eq(id)).First(ctx)
	if errors.Is(err, gorm.ErrRecordNotFound) {
		return nil, domain.Err{{DOMAIN_PASCAL}}NotFound
	} else if err != nil {
		return nil, fmt.Errorf("failed to find {{DOMAIN}}: %w", err)
	}

	return &{{DOMAIN_CAMEL}}, nil
}

func (r *{{DOMAIN_PASCAL}}Repo) List(ctx context.Context, query *types.{{DOMAIN_PASCAL}}ListQuery) (*common.PaginatedResult[models.{{DOMAIN_PASCAL}}], error) {
	conn, err := db.Default()
	if err != nil {
		return nil, db.ConnError(err)
	}

	q := gorm.G[models.{{DOMAIN_PASCAL}}](conn).Where("1 = 1")

	// Add your query filters here

	// Count total before applying pagination
	total, err := q.Count(ctx, "*")
	if err != nil {
		return nil, fmt.Errorf("failed to count {{DOMAIN}}s: %w", err)
	}

	q = q.Order(tables.{{DOMAIN_PASCAL}}.CreatedAt.Desc())
	q = q.Limit(query.PageSize)
	q = q.Offset(query.PageSize * (query.Page - 1))

	{{DOMAIN_CAMEL_PLURAL}}, err := q.Find(ctx)
	if err != nil {
		return nil, fmt.Errorf("failed to get {{DOMAIN}} list: %w", err)
	} else if len({{DOMAIN_CAMEL_PLURAL}}) == 0 {
		return &common.PaginatedResult[models.{{DOMAIN_PASCAL}}]{Total: 0, List: []models.{{DOMAIN_PASCAL}}{}}, nil
	}

	return &common.PaginatedResult[models.{{DOMAIN_PASCAL}}]{Total: int(total), List: {{DOMAIN_CAMEL_PLURAL}}}, nil
}

func (r *{{DOMAIN_PASCAL}}Repo) Create(ctx context.Context, data *types.{{DOMAIN_PASCAL}}Create) (*models.{{DOMAIN_PASCAL}}, error) {
	conn, err := db.Default()
	if err != nil {
		return nil, db.ConnError(err)
	}

	now := time.Now()
	{{DOMAIN_CAMEL}} := &models.{{DOMAIN_PASCAL}}{
		CreatedAt: now,
		UpdatedAt: now,
		// Map fields from data
	}

	if err := gorm.G[models.{{DOMAIN_PASCAL}}](conn).Create(ctx, {{DOMAIN_CAMEL}}); err != nil {
		return nil, fmt.Errorf("failed to create {{DOMAIN}}: %w", err)
	}

	return {{DOMAIN_CAMEL}}, nil
}

func (r *{{DOMAIN_PASCAL}}Repo) Update(ctx context.Context, id uint, data *types.{{DOMAIN_PASCAL}}Update) (*models.{{DOMAIN_PASCAL}}, error) {
	{{DOMAIN_CAMEL}}, err := r.Get(ctx, id)
	if err != nil {
		return nil, err
	}

	var updates []clause.Assigner

	// Append updates based on non-nil fields in data

	if len(updates) == 0 {
		return {{DOMAIN_CAMEL}}, nil // No updates needed
	}

	updates = append(updates, tables.{{DOMAIN_PASCAL}}.UpdatedAt.Set(time.Now()))

	conn, err := db.Default()
	if err != nil {
		return nil, db.ConnError(err)
	}

	rowsAffected, err := gorm.G[models.{{DOMAIN_PASCAL}}](conn).Where(tables.{{DOMAIN_PASCAL}}.ID.Eq(id)).Set(updates...).Update(ctx)
	if err != nil {
		return nil, fmt.Errorf("failed to update {{DOMAIN}}: %w", err)
	} else if rowsAffected == 0 {
		return nil, domain.Err{{DOMAIN_PASCAL}}NotFound
	}

	return r.Get(ctx, id)
}

func (r *{{DOMAIN_PASCAL}}Repo) Delete(ctx context.Context, id uint) error {
	conn, err := db.Default()
	if err != nil {
		return db.ConnError(err)
	}

	rowsAffected, err := gorm.G[models.{{DOMAIN_PASCAL}}](conn).Where(tables.{{DOMAIN_PASCAL}}.ID.Eq(id)).Delete(ctx)
	if err != nil {
		return fmt.Errorf("failed to delete {{DOMAIN}}: %w", err)
	} else if rowsAffected == 0 {
		return domain.Err{{DOMAIN_PASCAL}}NotFound
	}

	return nil
}
"#;

const SERVICE_GO: &str = r#"package service

import (
	"context"

	"{{MODULE}}/common"
	"{{MODULE}}/domains/{{DOMAIN}}/models"
	"{{MODULE}}/domains/{{DOMAIN}}/repo"
	"{{MODULE}}/domains/{{DOMAIN}}/types"
)

func Get{{DOMAIN_PASCAL}}(ctx context.Context, id uint) (*models.{{DOMAIN_PASCAL}}, error) {
	return repo.{{DOMAIN_PASCAL}}Repo.Get(ctx, id)
}

func List{{DOMAIN_PASCAL_PLURAL}}(ctx context.Context, query types.{{DOMAIN_PASCAL}}ListQuery) (*common.PaginatedResult[models.{{DOMAIN_PASCAL}}], error) {
	return repo.{{DOMAIN_PASCAL}}Repo.List(ctx, &query)
}

func Create{{DOMAIN_PASCAL}}(ctx context.Context, data *types.{{DOMAIN_PASCAL}}Create) (*models.{{DOMAIN_PASCAL}}, error) {
	return repo.{{DOMAIN_PASCAL}}Repo.Create(ctx, data)
}

func Update{{DOMAIN_PASCAL}}(ctx context.Context, id uint, updates *types.{{DOMAIN_PASCAL}}Update) (*models.{{DOMAIN_PASCAL}}, error) {
	return repo.{{DOMAIN_PASCAL}}Repo.Update(ctx, id, updates)
}

func Delete{{DOMAIN_PASCAL}}(ctx context.Context, id uint) error {
	return repo.{{DOMAIN_PASCAL}}Repo.Delete(ctx, id)
}
"#;

/// Request DTOs; `tygo` turns these into `types/index.ts`.
const TYPES_GO: &str = r#"package types

import "{{MODULE}}/common"

//tygo:emit import type * as common from "@/common"
type {{DOMAIN_PASCAL}}Create struct {
	// Add your fields here
}

type {{DOMAIN_PASCAL}}Update struct {
	// Add your fields here
}

type {{DOMAIN_PASCAL}}ListQuery struct {
	common.PaginatedQuery `tstype:",extends"`
	// Add your fields here
}
"#;

const ERRORS_GO: &str = r#"package {{DOMAIN}}

import "errors"

var Err{{DOMAIN_PASCAL}}NotFound = errors.New("{{DOMAIN}} not found")
"#;

#[cfg(test)]
mod tests {
    use std::path::Path;

    use crudgen_core::{
        application::ports::TemplateRenderer,
        domain::{DomainName, RenderContext},
    };

    use super::*;
    use crate::SimpleRenderer;

    fn render(name: &str) -> crudgen_core::domain::ScaffoldFileSet {
        let ctx = RenderContext::new(&DomainName::parse(name).unwrap(), "github.com/acme/app");
        SimpleRenderer::new()
            .render(&domain_template(), &ctx, Path::new("domains").join(name).as_path())
            .unwrap()
    }

    #[test]
    fn renders_the_fixed_file_set() {
        let set = render("comment");
        let mut files: Vec<String> = set.files().map(|f| f.path.to_string()).collect();
        files.sort();
        assert_eq!(
            files,
            [
                "api/comment.go",
                "api/comment.ts",
                "errors.go",
                "models/comment.go",
                "repo/comment.go",
                "repo/db/comment.go",
                "service/comment.go",
                "types/comment.go",
            ]
        );
        assert_eq!(set.directories().count(), DIRECTORIES.len());
    }

    #[test]
    fn rendering_is_deterministic() {
        assert_eq!(render("blog_post"), render("blog_post"));
    }

    #[test]
    fn no_placeholder_survives() {
        let set = render("category");
        for file in set.files() {
            assert!(!file.content.contains("{{"), "{} kept a placeholder", file.path);
        }
    }

    #[test]
    fn name_forms_land_in_the_right_places() {
        let set = render("category");

        let api = &set.file("api/category.go").unwrap().content;
        assert!(api.contains("server.NewApiEntry(\"/categories\", auth.UseAuth)"));
        assert!(api.contains("func listCategories(ctx *fiber.Ctx) error"));
        assert!(api.contains("domain \"github.com/acme/app/domains/category\""));

        let client = &set.file("api/category.ts").unwrap().content;
        assert!(client.contains("const categoryApi = new ApiEntry(\"/categories\")"));

        let repo = &set.file("repo/db/category.go").unwrap().content;
        assert!(repo.contains("categories, err := q.Find(ctx)"));

        let errors = &set.file("errors.go").unwrap().content;
        assert!(errors.contains("var ErrCategoryNotFound = errors.New(\"category not found\")"));
    }
}
